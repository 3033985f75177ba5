use std::fmt;
use std::path::Path;

/// Kernel variant, decided by filename extension.
///
/// Unknown extensions are an explicit variant of their own rather than an
/// error: a [`KernelKind::Generic`] kernel furnishes without any extra
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    /// Binary ephemeris kernel (`.bsp`).
    Spk,
    /// Text meta-kernel listing other kernels (`.tm`).
    Meta,
    /// Any other extension; furnished as-is.
    Generic,
}

const EXTENSIONS: &[(&str, KernelKind)] = &[("bsp", KernelKind::Spk), ("tm", KernelKind::Meta)];

impl KernelKind {
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, kind)| *kind)
            .unwrap_or(KernelKind::Generic)
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(KernelKind::Generic)
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KernelKind::Spk => "spk",
            KernelKind::Meta => "meta",
            KernelKind::Generic => "generic",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_variants() {
        assert_eq!(KernelKind::from_extension("bsp"), KernelKind::Spk);
        assert_eq!(KernelKind::from_extension("BSP"), KernelKind::Spk);
        assert_eq!(KernelKind::from_extension("tm"), KernelKind::Meta);
    }

    #[test]
    fn unknown_extensions_are_generic() {
        assert_eq!(KernelKind::from_extension("tls"), KernelKind::Generic);
        assert_eq!(KernelKind::from_path(Path::new("no_extension")), KernelKind::Generic);
    }

    #[test]
    fn kind_from_path_uses_the_extension() {
        assert_eq!(KernelKind::from_path(Path::new("a/b/psp.bsp")), KernelKind::Spk);
        assert_eq!(KernelKind::from_path(Path::new("mk/solo.tm")), KernelKind::Meta);
    }
}
