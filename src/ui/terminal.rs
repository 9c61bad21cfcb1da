use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub stdin_is_tty: bool,
    pub stderr_is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub width: u16,
    pub height: u16,
}

impl TerminalCapabilities {
    /// The menu is drawn on stderr; keys come from the controlling
    /// terminal, so stdin may carry a piped change list.
    pub fn can_prompt(&self) -> bool {
        self.stderr_is_tty
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_capabilities_impl(
        |key| std::env::var(key).ok(),
        std::io::stdin().is_terminal(),
        std::io::stderr().is_terminal(),
        crossterm::terminal::size().ok(),
    )
}

fn detect_capabilities_impl(
    get_env: impl Fn(&str) -> Option<String>,
    stdin_is_tty: bool,
    stderr_is_tty: bool,
    size: Option<(u16, u16)>,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some();

    let supports_color = stderr_is_tty && !term_is_dumb && !no_color;
    let supports_unicode = !term_is_dumb && unicode_locale(&get_env);

    let (width, height) = size.unwrap_or((80, 24));
    TerminalCapabilities {
        stdin_is_tty,
        stderr_is_tty,
        supports_color,
        supports_unicode,
        width,
        height,
    }
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    const KEYS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];
    for k in KEYS {
        if let Some(val) = get_env(k) {
            let v = val.to_lowercase();
            if v.is_empty() {
                continue;
            }
            // The first locale variable that is set decides.
            return v.contains("utf-8") || v.contains("utf8");
        }
    }

    // Default to true on modern systems unless explicitly "dumb".
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn caps(env: &[(&str, &str)], tty: bool, size: Option<(u16, u16)>) -> TerminalCapabilities {
        let map: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        detect_capabilities_impl(|k| map.get(k).cloned(), tty, tty, size)
    }

    #[test]
    fn detect_respects_no_color() {
        let c = caps(
            &[("NO_COLOR", "1"), ("TERM", "xterm-256color")],
            true,
            Some((120, 40)),
        );
        assert!(!c.supports_color);
        assert_eq!(c.width, 120);
    }

    #[test]
    fn detect_term_dumb_disables_enhancements() {
        let c = caps(&[("TERM", "dumb")], true, None);
        assert!(!c.supports_color);
        assert!(!c.supports_unicode);
    }

    #[test]
    fn detect_posix_locale_disables_unicode() {
        let c = caps(&[("LANG", "C"), ("TERM", "xterm")], true, None);
        assert!(!c.supports_unicode);

        let c = caps(&[("LC_ALL", "en_US.UTF-8"), ("LANG", "C")], true, None);
        assert!(c.supports_unicode);
    }

    #[test]
    fn detect_without_tty_cannot_prompt() {
        let c = caps(&[("TERM", "xterm")], false, None);
        assert!(!c.can_prompt());
        assert!(!c.supports_color);
        assert_eq!((c.width, c.height), (80, 24));
    }
}
