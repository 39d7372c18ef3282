pub mod fetcher;
pub mod pipeline;
pub mod resolver;
pub mod riot_id;

#[cfg(test)]
pub(crate) mod test_support;
