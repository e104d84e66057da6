// src/menu/item.rs
//! Context-menu item descriptor.

/// One entry a provider offers for a selection, bound to the file it acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<F> {
    /// Stable identifier, `Provider::Action`.
    pub name: String,
    /// Label; an underscore marks the mnemonic character.
    pub label: String,
    pub tip: String,
    /// Icon theme name.
    pub icon: String,
    pub file: F,
}

impl<F> MenuItem<F> {
    /// The character following the first `_`, lowercased.
    pub fn mnemonic(&self) -> Option<char> {
        let mut chars = self.label.chars();
        while let Some(c) = chars.next() {
            if c == '_' {
                return chars.next().map(|m| m.to_ascii_lowercase());
            }
        }
        None
    }

    /// Label with the mnemonic marker removed.
    pub fn display_label(&self) -> String {
        self.label.replacen('_', "", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> MenuItem<()> {
        MenuItem {
            name: "X::Y".into(),
            label: label.into(),
            tip: String::new(),
            icon: String::new(),
            file: (),
        }
    }

    #[test]
    fn mnemonic_follows_underscore() {
        let it = item("_Open with AVFS as virtual directory");
        assert_eq!(it.mnemonic(), Some('o'));
        assert_eq!(it.display_label(), "Open with AVFS as virtual directory");
    }

    #[test]
    fn no_underscore_no_mnemonic() {
        assert_eq!(item("Extract").mnemonic(), None);
        assert_eq!(item("Extract").display_label(), "Extract");
        assert_eq!(item("Trailing_").mnemonic(), None);
    }
}
