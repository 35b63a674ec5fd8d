//! Test server management.
//!
//! Spawns and manages relayd instances for integration testing.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    _data_dir: Option<TempDir>,
}

impl TestServer {
    /// Spawn a server listening on `127.0.0.1:port` with default limits.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        Self::spawn_with_limits(port, "").await
    }

    /// Spawn a server with extra lines appended to the `[limits]` table.
    pub async fn spawn_with_limits(port: u16, limits: &str) -> anyhow::Result<Self> {
        Self::spawn_with_config(port, &format!("[limits]\n{limits}\n")).await
    }

    /// Spawn a server with extra TOML appended to the generated config.
    pub async fn spawn_with_config(port: u16, extra: &str) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[listen]
address = "127.0.0.1:{port}"

{extra}
"#
        );
        std::fs::write(&config_path, config_content)?;

        let mut cmd = Command::new(binary_path());
        cmd.arg(&config_path).env_remove("PORT");
        Self::launch(cmd, port, Some(data_dir)).await
    }

    /// Spawn a server given only a bare port argument.
    pub async fn spawn_with_port_arg(port: u16) -> anyhow::Result<Self> {
        let mut cmd = Command::new(binary_path());
        cmd.arg(port.to_string()).env_remove("PORT");
        Self::launch(cmd, port, None).await
    }

    /// Spawn a server with no arguments and the port taken from `PORT`.
    pub async fn spawn_with_env_port(port: u16) -> anyhow::Result<Self> {
        let mut cmd = Command::new(binary_path());
        cmd.env("PORT", port.to_string());
        Self::launch(cmd, port, None).await
    }

    async fn launch(mut cmd: Command, port: u16, data_dir: Option<TempDir>) -> anyhow::Result<Self> {
        let child = cmd
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address()).await
    }

    /// Connect and log in as `name`.
    #[allow(dead_code)]
    pub async fn login(&self, name: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect().await?;
        client.login(name).await?;
        Ok(client)
    }
}

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_relayd"))
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
