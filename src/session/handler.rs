use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::middleware::logging::{log_command, log_departure};
use crate::protocol::{handle_command, parse_command, responses};
use crate::registry::PlayerRegistry;
use crate::session::Session;
use crate::session::framing::{Frame, read_frame};

/// Runs the lobby protocol for one client connection.
///
/// - Reads bounded request lines from the stream.
/// - Dispatches each one with `handle_command` against the shared registry.
/// - Writes back the response, if the command produced one.
/// - When the stream ends for any reason, releases every player name this
///   session joined under.
///
/// Returns `Ok(())` when the peer closed the connection and the stream
/// fault otherwise. Cleanup runs in both cases.
pub async fn handle_session<S>(
    stream: S,
    peer_addr: SocketAddr,
    registry: Arc<PlayerRegistry>,
    config: Arc<ServerConfig>,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(peer_addr.ip());
    let result = run_session(stream, peer_addr, &mut session, &registry, &config).await;

    for name in session.close(&registry) {
        log_departure(&peer_addr, &name);
    }
    result
}

async fn run_session<S>(
    stream: S,
    peer_addr: SocketAddr,
    session: &mut Session,
    registry: &PlayerRegistry,
    config: &ServerConfig,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);
    let max_len = config.max_message_length;
    let idle_timeout = config.idle_timeout();

    loop {
        let frame = match idle_timeout {
            Some(limit) => tokio::time::timeout(limit, read_frame(&mut reader, max_len))
                .await
                .map_err(|_| SessionError::IdleTimeout(limit))?,
            None => read_frame(&mut reader, max_len).await,
        }
        .map_err(SessionError::ReadFailed)?;

        let line = match frame {
            Frame::Eof => {
                info!("Connection closed by client {}", peer_addr);
                return Ok(());
            }
            Frame::Overlong => {
                debug!("Discarded request over {} bytes from {}", max_len, peer_addr);
                continue;
            }
            Frame::Line(line) => line,
        };

        let command = parse_command(&line);
        log_command(&peer_addr, &command);

        let result = handle_command(session, &command, registry);

        if let Some(msg) = result.message {
            let msg = responses::cap(msg, max_len);
            if let Err(e) = send(&mut write_half, &msg).await {
                warn!("Failed to send response to {}: {}", peer_addr, e);
                return Err(SessionError::WriteFailed(e));
            }
        }
    }
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, msg: &str) -> std::io::Result<()> {
    writer.write_all(msg.as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NameReusePolicy;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, DuplexStream};
    use tokio::task::JoinHandle;

    struct Client {
        reader: BufReader<tokio::io::ReadHalf<DuplexStream>>,
        writer: tokio::io::WriteHalf<DuplexStream>,
    }

    impl Client {
        async fn send(&mut self, line: &str) {
            self.writer
                .write_all(format!("{}\n", line).as_bytes())
                .await
                .unwrap();
        }

        async fn request(&mut self, line: &str) -> String {
            self.send(line).await;
            self.response().await
        }

        async fn request_raw(&mut self, bytes: &[u8]) -> String {
            self.writer.write_all(bytes).await.unwrap();
            self.response().await
        }

        async fn response(&mut self) -> String {
            let mut response = String::new();
            self.reader.read_line(&mut response).await.unwrap();
            response
        }
    }

    fn start(
        peer: &str,
        registry: &Arc<PlayerRegistry>,
        config: ServerConfig,
    ) -> (Client, JoinHandle<Result<(), SessionError>>) {
        let (client, server) = tokio::io::duplex(1024);
        let handle = tokio::spawn(handle_session(
            server,
            peer.parse().unwrap(),
            Arc::clone(registry),
            Arc::new(config),
        ));
        let (read_half, writer) = tokio::io::split(client);
        let client = Client {
            reader: BufReader::new(read_half),
            writer,
        };
        (client, handle)
    }

    #[tokio::test]
    async fn test_join_invite_and_list() {
        let registry = Arc::new(PlayerRegistry::default());
        let (mut alice, _) = start("10.0.0.1:5000", &registry, ServerConfig::default());
        let (mut bob, _) = start("10.0.0.2:5000", &registry, ServerConfig::default());

        assert_eq!(
            alice.request("join alice").await,
            "Player alice added to the player's list\n"
        );
        assert_eq!(bob.request("invite alice").await, "10.0.0.1\n");
        assert_eq!(bob.request("list").await, "Players: alice\n");
    }

    #[tokio::test]
    async fn test_unknown_command_gets_no_response() {
        let registry = Arc::new(PlayerRegistry::default());
        let (mut client, _) = start("10.0.0.1:5000", &registry, ServerConfig::default());

        client.send("dance").await;
        client.send("join").await;
        // The next answer belongs to `list`, so nothing was sent before it
        assert_eq!(client.request("list").await, "There are no players online\n");
    }

    #[tokio::test]
    async fn test_request_without_terminator_is_answered() {
        let registry = Arc::new(PlayerRegistry::default());
        let (mut client, _) = start("10.0.0.1:5000", &registry, ServerConfig::default());

        assert_eq!(
            client.request_raw(b"list").await,
            "There are no players online\n"
        );
        assert_eq!(
            client.request_raw(b"join alice").await,
            "Player alice added to the player's list\n"
        );
        assert_eq!(registry.lookup("alice"), Some("10.0.0.1".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_overlong_request_is_ignored() {
        let registry = Arc::new(PlayerRegistry::default());
        let config = ServerConfig {
            max_message_length: 16,
            ..ServerConfig::default()
        };
        let (mut client, _) = start("10.0.0.1:5000", &registry, config);

        client.send("join a-name-that-does-not-fit").await;
        assert_eq!(client.request("list").await, "There are no players online\n");
        assert_eq!(registry.count(), 0);
    }

    #[tokio::test]
    async fn test_response_is_capped() {
        let registry = Arc::new(PlayerRegistry::default());
        let config = ServerConfig {
            max_message_length: 24,
            ..ServerConfig::default()
        };
        let (mut client, _) = start("10.0.0.1:5000", &registry, config);

        let response = client.request("join alice").await;
        assert_eq!(response, "Player alice added to t\n");
        assert_eq!(response.len(), 24);
    }

    #[tokio::test]
    async fn test_close_releases_player() {
        let registry = Arc::new(PlayerRegistry::default());
        let (mut alice, handle) = start("10.0.0.1:5000", &registry, ServerConfig::default());
        alice.request("join alice").await;
        assert_eq!(registry.count(), 1);

        drop(alice);
        assert!(handle.await.unwrap().is_ok());

        assert_eq!(registry.count(), 0);
        assert_eq!(registry.lookup("alice"), None);
        assert!(registry.exists("alice"));
    }

    #[tokio::test]
    async fn test_close_releases_every_joined_name() {
        let registry = Arc::new(PlayerRegistry::default());
        let (mut player, handle) = start("10.0.0.1:5000", &registry, ServerConfig::default());
        player.request("join alice").await;
        player.request("join alicia").await;
        assert_eq!(player.request("list").await.matches("ali").count(), 2);
        assert_eq!(registry.count(), 2);

        drop(player);
        assert!(handle.await.unwrap().is_ok());

        assert_eq!(registry.count(), 0);
        assert_eq!(registry.lookup("alice"), None);
        assert_eq!(registry.lookup("alicia"), None);
    }

    #[tokio::test]
    async fn test_departed_name_under_each_policy() {
        for (policy, expected) in [
            (
                NameReusePolicy::Reserved,
                "Player alice is already in the player's list\n",
            ),
            (
                NameReusePolicy::AfterDeparture,
                "Player alice added to the player's list\n",
            ),
        ] {
            let registry = Arc::new(PlayerRegistry::new(policy));
            let (mut first, handle) = start("10.0.0.1:5000", &registry, ServerConfig::default());
            first.request("join alice").await;
            drop(first);
            handle.await.unwrap().unwrap();

            let (mut second, _) = start("10.0.0.2:5000", &registry, ServerConfig::default());
            assert_eq!(second.request("invite alice").await, "Player alice not found\n");

            let (mut third, _) = start("10.0.0.3:5000", &registry, ServerConfig::default());
            assert_eq!(third.request("join alice").await, expected);
        }
    }

    #[tokio::test]
    async fn test_idle_timeout_closes_session() {
        let registry = Arc::new(PlayerRegistry::default());
        let config = ServerConfig {
            idle_timeout_secs: 1,
            ..ServerConfig::default()
        };
        let (mut client, handle) = start("10.0.0.1:5000", &registry, config);
        client.request("join alice").await;

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("session should end on its own")
            .unwrap();

        assert!(matches!(result, Err(SessionError::IdleTimeout(_))));
        assert_eq!(registry.count(), 0);
    }
}
