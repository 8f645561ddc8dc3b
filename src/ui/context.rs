use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use listsync::config::{ColorMode, Config};
use listsync::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(cli_color: Option<ColorWhen>, config: &Config) -> Self {
        Self::from_caps(cli_color, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            caps,
            color,
            unicode: caps.supports_unicode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps(is_ci: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            stdout_tty: true,
            stdin_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci,
        }
    }

    #[test]
    fn ci_disables_auto_color() {
        let ui = UiContext::from_caps(None, &Config::default(), tty_caps(true));
        assert!(!ui.color);
    }

    #[test]
    fn cli_flag_overrides_config() {
        let mut config = Config::default();
        config.output.color = ColorMode::Never;

        let ui = UiContext::from_caps(Some(ColorWhen::Always), &config, tty_caps(false));
        assert!(ui.color);
    }

    #[test]
    fn config_never_wins_over_auto_detection() {
        let mut config = Config::default();
        config.output.color = ColorMode::Never;

        let ui = UiContext::from_caps(None, &config, tty_caps(false));
        assert!(!ui.color);
    }
}
