// vimcore Configuration
// Edit this file to change the engine defaults. Key bindings are built in;
// see core::commands::register_all.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // =========================================================================
    // HISTORY
    // =========================================================================
    // Maximum number of undo entries. When the limit is reached the oldest
    // entry is dropped and can no longer be undone.
    config.set("history_limit", 10_000);

    // =========================================================================
    // DISPLAY HINTS
    // =========================================================================
    // Used only by the display-row motions gj / gk.
    config.set("tab_width", 4); // Columns per tab stop
    config.set("wrap_width", 0); // Soft-wrap width; 0 = no wrapping

    // Report yank/select regions so the host can flash them
    config.set("yank_highlight", true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_configuration_defaults() {
        let mut config = Config::default();
        configure(&mut config);

        assert_eq!(config.get_int("history_limit"), Some(10_000));
        assert_eq!(config.get_int("tab_width"), Some(4));
        assert_eq!(config.get_int("wrap_width"), Some(0));
        assert_eq!(config.get_bool("yank_highlight"), Some(true));
        assert_eq!(config.history_limit(), 10_000);
    }
}
