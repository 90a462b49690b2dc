//! Interface sources backed by system commands.
//!
//! Each command runs with a timeout; a command that does not finish in time
//! is killed and reported as [`SourceError::Timeout`].

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::{InterfaceSource, RawSnapshot, SnapshotFormat, SourceError};

/// Which system command to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `ip -o addr show scope global`
    IpAddr,
    /// `hostname -I`
    Hostname,
}

impl SourceKind {
    /// Short name used in configuration and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IpAddr => "ip",
            Self::Hostname => "hostname",
        }
    }

    /// Parses a configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ip" | "ip-addr" => Some(Self::IpAddr),
            "hostname" => Some(Self::Hostname),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs a command and captures its standard output as a [`RawSnapshot`].
///
/// # Example
///
/// ```no_run
/// use local_ip::network::{CommandSource, InterfaceSource};
/// use std::time::Duration;
///
/// # async fn demo() {
/// let source = CommandSource::ip_addr(Duration::from_secs(2));
/// let snapshot = source.fetch().await.expect("ip is available");
/// println!("{}", snapshot.text);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CommandSource {
    name: String,
    program: String,
    args: Vec<String>,
    format: SnapshotFormat,
    timeout: Duration,
}

impl CommandSource {
    /// Creates a source running `program` with `args`.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        format: SnapshotFormat,
        timeout: Duration,
    ) -> Self {
        let program = program.into();
        Self {
            name: program.clone(),
            program,
            args: args.into_iter().map(Into::into).collect(),
            format,
            timeout,
        }
    }

    /// `ip -o addr show scope global`
    #[must_use]
    pub fn ip_addr(timeout: Duration) -> Self {
        Self::new(
            "ip",
            ["-o", "addr", "show", "scope", "global"],
            SnapshotFormat::IpAddr,
            timeout,
        )
    }

    /// `hostname -I`
    #[must_use]
    pub fn hostname(timeout: Duration) -> Self {
        Self::new("hostname", ["-I"], SnapshotFormat::AddressList, timeout)
    }

    /// Creates the source for a configured kind.
    #[must_use]
    pub fn for_kind(kind: SourceKind, timeout: Duration) -> Self {
        match kind {
            SourceKind::IpAddr => Self::ip_addr(timeout),
            SourceKind::Hostname => Self::hostname(timeout),
        }
    }

    /// Returns the program that will be run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl InterfaceSource for CommandSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<RawSnapshot, SourceError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SourceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        // Dropping the pending future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| SourceError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            })?
            .map_err(|e| SourceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SourceError::ExitStatus {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(RawSnapshot::new(
            self.format,
            String::from_utf8_lossy(&output.stdout),
            self.name.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> CommandSource {
        CommandSource::new("sh", ["-c", script], SnapshotFormat::IpAddr, timeout)
    }

    #[test]
    fn ip_addr_uses_global_scope_one_line_output() {
        let source = CommandSource::ip_addr(Duration::from_secs(2));

        assert_eq!(source.program(), "ip");
        assert_eq!(source.args(), ["-o", "addr", "show", "scope", "global"]);
        assert_eq!(source.name(), "ip");
    }

    #[test]
    fn hostname_uses_address_list_format() {
        let source = CommandSource::hostname(Duration::from_secs(2));

        assert_eq!(source.program(), "hostname");
        assert_eq!(source.args(), ["-I"]);
        assert_eq!(source.format, SnapshotFormat::AddressList);
    }

    #[test]
    fn for_kind_maps_each_kind() {
        let timeout = Duration::from_millis(500);
        assert_eq!(CommandSource::for_kind(SourceKind::IpAddr, timeout).program(), "ip");
        assert_eq!(
            CommandSource::for_kind(SourceKind::Hostname, timeout).program(),
            "hostname"
        );
        assert_eq!(CommandSource::for_kind(SourceKind::IpAddr, timeout).timeout(), timeout);
    }

    #[test]
    fn source_kind_names_round_trip() {
        for kind in [SourceKind::IpAddr, SourceKind::Hostname] {
            assert_eq!(SourceKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(SourceKind::from_name(" IP "), Some(SourceKind::IpAddr));
        assert_eq!(SourceKind::from_name("netlink"), None);
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let source = CommandSource::new(
            "definitely-not-a-real-program-4711",
            Vec::<String>::new(),
            SnapshotFormat::IpAddr,
            Duration::from_secs(2),
        );

        let result = source.fetch().await;

        assert!(matches!(result, Err(SourceError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_on_success() {
        let source = sh("echo '2: eth0    inet 10.0.0.1/8'", Duration::from_secs(5));

        let snapshot = source.fetch().await.unwrap();

        assert_eq!(snapshot.text.trim(), "2: eth0    inet 10.0.0.1/8");
        assert_eq!(snapshot.origin, "sh");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_is_success() {
        let source = sh("true", Duration::from_secs(5));

        let snapshot = source.fetch().await.unwrap();

        assert!(snapshot.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_reported_with_stderr() {
        let source = sh("echo boom >&2; exit 3", Duration::from_secs(5));

        let error = source.fetch().await.unwrap_err();

        match error {
            SourceError::ExitStatus { stderr, status, .. } => {
                assert_eq!(stderr, "boom");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let source = sh("sleep 5", Duration::from_millis(100));

        let error = source.fetch().await.unwrap_err();

        assert!(matches!(error, SourceError::Timeout { .. }));
    }
}
