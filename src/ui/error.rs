use listsync::config::ConfigWarning;
use listsync::infrastructure::google::CredentialError;
use listsync::ListSyncError;

use crate::ui::text::ColoredText;

pub fn format_error(err: &anyhow::Error, color: bool) -> String {
    let prefix = ColoredText::error("[ERROR]").bold().render(color);
    let mut out = format!("{} {}\n", prefix, err);

    if let Some(hint) = err.downcast_ref::<ListSyncError>().and_then(hint_for) {
        out.push_str(&format!("{}\n", ColoredText::dim(format!("  hint: {}", hint)).render(color)));
    }
    out
}

fn hint_for(err: &ListSyncError) -> Option<&'static str> {
    match err {
        ListSyncError::ConfigInconsistency(_) => {
            Some("check [catalog] in listsync.toml: every segment needs exactly one mailing list")
        }
        ListSyncError::Credential(CredentialError::Missing { .. }) => {
            Some("pass --token PATH or set LISTSYNC_ACCESS_TOKEN")
        }
        ListSyncError::Credential(CredentialError::Expired) => {
            Some("re-authorize and save a token cache that includes a refresh token")
        }
        ListSyncError::ConfigParse { .. } => Some("fix the TOML syntax and try again"),
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, color: bool) {
    eprint!("{}", format_error(err, color));
}

pub fn print_config_warning(warning: &ConfigWarning, color: bool) {
    eprintln!(
        "{} {}",
        ColoredText::warning("[WARN]").render(color),
        warning
    );
}
