//! Tests for the run module.

use std::sync::Mutex;
use std::time::Duration;

use local_ip::config::{Cli, ValidatedConfig};
use local_ip::indicator::CommandLine;
use local_ip::network::{AddressFamily, RawSnapshot, SnapshotFormat, SourceKind};

use super::*;

const ETH0: &str = "2: eth0    inet 192.168.1.42/24 scope global eth0\n";
const DOCKER_ONLY: &str = "3: docker0    inet 172.17.0.1/16 scope global docker0\n";

/// Source returning one fixed `ip` output, or failing when `text` is `None`.
struct FixedSource {
    text: Option<&'static str>,
}

impl FixedSource {
    const fn ok(text: &'static str) -> Self {
        Self { text: Some(text) }
    }

    const fn failing() -> Self {
        Self { text: None }
    }
}

impl InterfaceSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self) -> Result<RawSnapshot, SourceError> {
        self.text
            .map(|text| RawSnapshot::new(SnapshotFormat::IpAddr, text, "fixed"))
            .ok_or(SourceError::NoSources)
    }
}

#[derive(Default)]
struct RecordingClipboard {
    texts: Mutex<Vec<String>>,
}

impl Clipboard for RecordingClipboard {
    async fn set_text(&self, text: &str) -> Result<(), CopyError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    async fn set_text(&self, _text: &str) -> Result<(), CopyError> {
        Err(CopyError::Timeout {
            program: "wl-copy".to_string(),
            timeout: Duration::from_secs(1),
        })
    }
}

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["local-ip"];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn no_address_displays_message() {
        assert_eq!(
            RunError::NoAddress.to_string(),
            "No eligible local address found"
        );
    }

    #[test]
    fn resolve_errors_map_to_run_errors() {
        assert!(matches!(
            RunError::from(ResolveError::NoAddressFound),
            RunError::NoAddress
        ));
        assert!(matches!(
            RunError::from(ResolveError::DataSourceUnavailable(SourceError::NoSources)),
            RunError::Source(SourceError::NoSources)
        ));
    }

    #[test]
    fn no_address_is_not_a_failure() {
        assert!(!RunError::NoAddress.is_failure());
        assert!(RunError::Source(SourceError::NoSources).is_failure());
        assert!(
            RunError::Copy(CopyError::Timeout {
                program: "wl-copy".to_string(),
                timeout: Duration::from_secs(1),
            })
            .is_failure()
        );
    }

    #[test]
    fn copy_error_displays_source() {
        let error = RunError::Copy(CopyError::ExitStatus {
            program: "xclip".to_string(),
            status: "exit status: 1".to_string(),
        });

        assert!(error.to_string().contains("Failed to copy address"));
        assert!(error.to_string().contains("xclip"));
    }
}

mod parse_command {
    use super::*;

    #[test]
    fn empty_line_copies() {
        assert_eq!(parse_command(""), Some(UserCommand::Copy));
        assert_eq!(parse_command("   "), Some(UserCommand::Copy));
    }

    #[test]
    fn short_and_long_forms() {
        assert_eq!(parse_command("c"), Some(UserCommand::Copy));
        assert_eq!(parse_command("copy"), Some(UserCommand::Copy));
        assert_eq!(parse_command("r"), Some(UserCommand::Refresh));
        assert_eq!(parse_command("refresh"), Some(UserCommand::Refresh));
        assert_eq!(parse_command("q"), Some(UserCommand::Quit));
        assert_eq!(parse_command("quit"), Some(UserCommand::Quit));
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(parse_command("  Copy \r"), Some(UserCommand::Copy));
        assert_eq!(parse_command("QUIT"), Some(UserCommand::Quit));
    }

    #[test]
    fn unknown_command_is_none() {
        assert_eq!(parse_command("paste"), None);
        assert_eq!(parse_command("c c"), None);
    }
}

mod builders {
    use super::*;

    #[test]
    fn source_chain_follows_configured_order() {
        let config = config(&["--source", "hostname", "--source", "ip", "--timeout-ms", "700"]);

        let source = build_source(&config);
        let programs: Vec<&str> = source.sources().iter().map(CommandSource::program).collect();

        assert_eq!(programs, vec!["hostname", "ip"]);
        assert!(
            source
                .sources()
                .iter()
                .all(|s| s.timeout() == Duration::from_millis(700))
        );
    }

    #[test]
    fn default_chain_tries_ip_first() {
        let config = config(&[]);

        assert_eq!(config.sources, vec![SourceKind::IpAddr, SourceKind::Hostname]);
        assert_eq!(build_source(&config).sources()[0].program(), "ip");
    }

    #[test]
    fn copy_action_uses_configured_clipboard() {
        let config = config(&["--clipboard-command", "xclip -selection clipboard"]);

        let action = build_copy_action(&config);

        assert_eq!(
            action.clipboard().command(),
            &CommandLine::new(
                "xclip",
                ["-selection", "clipboard"],
                Duration::from_millis(2000)
            )
        );
        assert!(matches!(action.notifier(), AppNotifier::Command(_)));
    }

    #[test]
    fn no_notify_uses_log_notifier() {
        let action = build_copy_action(&config(&["--no-notify"]));

        assert!(matches!(action.notifier(), AppNotifier::Disabled(_)));
    }
}

mod report {
    use super::*;

    fn resolved() -> ResolvedAddress {
        ResolvedAddress {
            value: "192.168.1.42".to_string(),
            family: AddressFamily::V4,
            interface: "eth0".to_string(),
        }
    }

    #[test]
    fn success_report() {
        let json: serde_json::Value =
            serde_json::from_str(&render_report(&Ok(resolved())).unwrap()).unwrap();

        assert_eq!(json["label"], "192.168.1.42");
        assert_eq!(json["address"]["value"], "192.168.1.42");
        assert_eq!(json["address"]["family"], "IPv4");
        assert_eq!(json["address"]["interface"], "eth0");
        assert!(json["error"].is_null());
    }

    #[test]
    fn no_address_report() {
        let json: serde_json::Value =
            serde_json::from_str(&render_report(&Err(ResolveError::NoAddressFound)).unwrap())
                .unwrap();

        assert_eq!(json["label"], "No IP");
        assert!(json["address"].is_null());
        assert_eq!(json["error"], "No eligible address found");
    }

    #[test]
    fn failure_report() {
        let result = Err(ResolveError::DataSourceUnavailable(SourceError::NoSources));
        let json: serde_json::Value = serde_json::from_str(&render_report(&result).unwrap()).unwrap();

        assert_eq!(json["label"], "Error");
        assert!(json["address"].is_null());
        assert!(json["error"].as_str().unwrap().contains("No interface sources configured"));
    }
}

mod show {
    use super::*;

    #[tokio::test]
    async fn prints_label() {
        let mut out = Vec::new();

        show_with(&FixedSource::ok(ETH0), false, &mut out).await.unwrap();

        assert_eq!(output(out), "192.168.1.42\n");
    }

    #[tokio::test]
    async fn prints_json_report() {
        let mut out = Vec::new();

        show_with(&FixedSource::ok(ETH0), true, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.starts_with('{'));
        assert!(text.contains("\"interface\":\"eth0\""));
    }

    #[tokio::test]
    async fn no_address_prints_label_and_fails() {
        let mut out = Vec::new();

        let result = show_with(&FixedSource::ok(DOCKER_ONLY), false, &mut out).await;

        assert!(matches!(result, Err(RunError::NoAddress)));
        assert_eq!(output(out), "No IP\n");
    }

    #[tokio::test]
    async fn source_failure_prints_error_label() {
        let mut out = Vec::new();

        let result = show_with(&FixedSource::failing(), false, &mut out).await;

        assert!(matches!(result, Err(RunError::Source(_))));
        assert_eq!(output(out), "Error\n");
    }
}

mod copy {
    use super::*;

    #[tokio::test]
    async fn copies_resolved_address() {
        let action = CopyAction::new(RecordingClipboard::default(), LogNotifier);
        let mut out = Vec::new();

        copy_with(&FixedSource::ok(ETH0), &action, &mut out).await.unwrap();

        assert_eq!(*action.clipboard().texts.lock().unwrap(), vec!["192.168.1.42"]);
        assert_eq!(output(out), "192.168.1.42\n");
    }

    #[tokio::test]
    async fn nothing_resolved_copies_nothing() {
        let action = CopyAction::new(RecordingClipboard::default(), LogNotifier);
        let mut out = Vec::new();

        let result = copy_with(&FixedSource::ok(DOCKER_ONLY), &action, &mut out).await;

        assert!(matches!(result, Err(RunError::NoAddress)));
        assert!(action.clipboard().texts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clipboard_failure_is_copy_error() {
        let action = CopyAction::new(BrokenClipboard, LogNotifier);
        let mut out = Vec::new();

        let result = copy_with(&FixedSource::ok(ETH0), &action, &mut out).await;

        assert!(matches!(result, Err(RunError::Copy(CopyError::Timeout { .. }))));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn copy_current_uses_indicator_label() {
        let indicator = Indicator::new(FixedSource::ok(ETH0));
        let action = CopyAction::new(RecordingClipboard::default(), LogNotifier);

        copy_current(&action, &indicator).await;
        assert!(action.clipboard().texts.lock().unwrap().is_empty());

        indicator.refresh().await;
        copy_current(&action, &indicator).await;
        assert_eq!(*action.clipboard().texts.lock().unwrap(), vec!["192.168.1.42"]);
    }

    #[tokio::test]
    async fn disabled_notifier_succeeds() {
        let notifier = AppNotifier::Disabled(LogNotifier);

        assert!(notifier.notify("IP Address Copied", "Copied 10.0.0.1 to clipboard").await.is_ok());
    }
}
