//! Probe for the local League client's Live Client Data API.
//!
//! The game serves it on `https://127.0.0.1:2999` with a self-signed certificate, so
//! certificate checks are skipped for loopback hosts only.

use crate::error::AppError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use std::sync::Arc;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

use super::client::{build_agent, is_timeout, read_error, transport_error, USER_AGENT};
use super::models::ActivePlayerDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveClientStatus {
    /// A game is in progress and the active player is known.
    InGame { summoner_name: String, level: u32 },
    /// The endpoint answered but has no game data yet (loading screen, lobby).
    Loading { status: u16 },
    /// Nothing is listening: the game is not running.
    NotRunning,
}

pub fn probe(url: &str, timeout: Duration) -> Result<LiveClientStatus, AppError> {
    let agent = if is_loopback(url) {
        loopback_agent(timeout)?
    } else {
        build_agent(timeout)
    };

    tracing::debug!("GET {}", url);
    match agent.get(url).call() {
        Ok(resp) => {
            let body = resp.into_string().map_err(|e| read_error(url, e))?;
            let player: ActivePlayerDto =
                serde_json::from_str(&body).map_err(|e| AppError::Json(e.to_string()))?;
            let summoner_name = player
                .riot_id
                .filter(|id| !id.is_empty())
                .unwrap_or(player.summoner_name);
            Ok(LiveClientStatus::InGame {
                summoner_name,
                level: player.level,
            })
        }
        Err(ureq::Error::Status(status, _)) => Ok(LiveClientStatus::Loading { status }),
        Err(ureq::Error::Transport(transport))
            if nothing_listening(transport.kind(), is_timeout(&transport)) =>
        {
            Ok(LiveClientStatus::NotRunning)
        }
        Err(ureq::Error::Transport(transport)) => Err(transport_error(url, &transport)),
    }
}

/// A refused connection means no game. A connect that timed out is reported as a timeout,
/// since ureq files both under `ConnectionFailed`.
fn nothing_listening(kind: ureq::ErrorKind, timed_out: bool) -> bool {
    kind == ureq::ErrorKind::ConnectionFailed && !timed_out
}

fn is_loopback(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.starts_with("127.0.0.1") || rest.starts_with("localhost") || rest.starts_with("[::1]")
}

fn loopback_agent(timeout: Duration) -> Result<Agent, AppError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let tls = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| AppError::Http(e.to_string()))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptSelfSigned(provider)))
        .with_no_client_auth();

    Ok(AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .tls_config(Arc::new(tls))
        .build())
}

/// Accepts any certificate but still checks handshake signatures.
#[derive(Debug)]
struct AcceptSelfSigned(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptSelfSigned {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
