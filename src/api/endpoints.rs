// URL builders for the endpoints the tracker calls

pub const DATA_DRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

fn cluster_host(cluster: &str) -> String {
    format!("https://{}.api.riotgames.com", cluster)
}

pub fn account_by_riot_id(region: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        cluster_host(region),
        urlencoding::encode(game_name),
        urlencoding::encode(tag_line)
    )
}

/// `count: None` leaves the server default (20) in place.
pub fn match_ids_by_puuid(routing: &str, puuid: &str, count: Option<usize>) -> String {
    let mut url = format!(
        "{}/lol/match/v5/matches/by-puuid/{}/ids?start=0",
        cluster_host(routing),
        urlencoding::encode(puuid)
    );
    if let Some(count) = count {
        url.push_str(&format!("&count={}", count));
    }
    url
}

pub fn match_by_id(routing: &str, match_id: &str) -> String {
    format!(
        "{}/lol/match/v5/matches/{}",
        cluster_host(routing),
        urlencoding::encode(match_id)
    )
}

pub fn ddragon_versions() -> String {
    format!("{}/api/versions.json", DATA_DRAGON_BASE)
}

pub fn champion_portrait(version: &str, champion_name: &str) -> String {
    format!(
        "{}/cdn/{}/img/champion/{}.png",
        DATA_DRAGON_BASE,
        version,
        urlencoding::encode(champion_name)
    )
}
