//! Working-directory expansion for navigation commands.
//!
//! Paths in templates and flags may start with `~`. They are expanded against
//! the home directory before being typed into a pane, and quoted when a shell
//! would otherwise split them.
//!
//! # Example
//!
//! ```
//! use sessionup::expand::{cd_command, expand_home_with};
//! use std::path::Path;
//!
//! let path = expand_home_with("~/src/app", Some(Path::new("/home/dev")));
//! assert_eq!(path, "/home/dev/src/app");
//! assert_eq!(cd_command("/tmp/my dir"), "cd '/tmp/my dir'");
//! ```

use std::path::Path;

/// Expand a leading `~` or `~/` using the current user's home directory.
///
/// Paths without a leading tilde, and `~user` forms, are returned unchanged.
pub fn expand_home(path: &str) -> String {
    expand_home_with(path, dirs::home_dir().as_deref())
}

/// Expand a leading `~` against an explicit home directory.
///
/// If `home` is `None` the path is returned unchanged.
pub fn expand_home_with(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        return home.to_string_lossy().into_owned();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest).to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}

/// Quote a word for a POSIX shell if it contains special characters.
///
/// # Examples
///
/// ```
/// use sessionup::expand::shell_quote;
///
/// assert_eq!(shell_quote("/tmp/x"), "/tmp/x");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+,:@%=~".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Build the `cd` command typed into a pane for an already expanded path.
pub fn cd_command(path: &str) -> String {
    format!("cd {}", shell_quote(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home_with("~", Some(home)), "/home/dev");
        assert_eq!(expand_home_with("~/code", Some(home)), "/home/dev/code");
        assert_eq!(expand_home_with("/opt/x", Some(home)), "/opt/x");
        assert_eq!(expand_home_with("~other/x", Some(home)), "~other/x");
        assert_eq!(expand_home_with("~/code", None), "~/code");
    }

    #[test]
    fn test_cd_command_quoting() {
        assert_eq!(cd_command("/tmp/x"), "cd /tmp/x");
        assert_eq!(cd_command("/tmp/a b"), "cd '/tmp/a b'");
        assert_eq!(cd_command("/tmp/$HOME"), "cd '/tmp/$HOME'");
    }
}
