//! Format-tagged module

use std::fmt;

use fox_symmod::SymModule;
use fox_xm::XmModule;

/// Supported module formats, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleFormat {
    Xm,
    SymMod,
}

impl ModuleFormat {
    /// Short format name, e.g. `"XM"`
    pub fn name(self) -> &'static str {
        match self {
            Self::Xm => "XM",
            Self::SymMod => "SymMOD",
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded module of any supported format
#[derive(Debug, Clone, PartialEq)]
pub enum Module {
    Xm(XmModule),
    SymMod(SymModule),
}

impl Module {
    pub fn format(&self) -> ModuleFormat {
        match self {
            Self::Xm(_) => ModuleFormat::Xm,
            Self::SymMod(_) => ModuleFormat::SymMod,
        }
    }

    /// Song title; SymMOD modules only carry an info text
    pub fn title(&self) -> &str {
        match self {
            Self::Xm(xm) => &xm.title,
            Self::SymMod(sym) => sym.info_text.as_deref().unwrap_or(""),
        }
    }

    pub fn num_channels(&self) -> usize {
        match self {
            Self::Xm(xm) => xm.num_channels as usize,
            Self::SymMod(sym) => sym.channel_count(),
        }
    }

    pub fn num_patterns(&self) -> usize {
        match self {
            Self::Xm(xm) => xm.patterns.len(),
            Self::SymMod(sym) => sym.patterns.len(),
        }
    }

    pub fn num_instruments(&self) -> usize {
        match self {
            Self::Xm(xm) => xm.instruments.len(),
            Self::SymMod(sym) => sym.instruments.len(),
        }
    }

    pub fn as_xm(&self) -> Option<&XmModule> {
        match self {
            Self::Xm(xm) => Some(xm),
            Self::SymMod(_) => None,
        }
    }

    pub fn as_symmod(&self) -> Option<&SymModule> {
        match self {
            Self::SymMod(sym) => Some(sym),
            Self::Xm(_) => None,
        }
    }
}

impl From<XmModule> for Module {
    fn from(module: XmModule) -> Self {
        Self::Xm(module)
    }
}

impl From<SymModule> for Module {
    fn from(module: SymModule) -> Self {
        Self::SymMod(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmod_accessors() {
        let module = Module::from(SymModule {
            version: 1,
            number_of_channels: Some(-3),
            info_text: Some("about".to_string()),
            ..Default::default()
        });

        assert_eq!(module.format(), ModuleFormat::SymMod);
        assert_eq!(module.format().to_string(), "SymMOD");
        assert_eq!(module.title(), "about");
        assert_eq!(module.num_channels(), 0);
        assert_eq!(module.num_patterns(), 0);
        assert!(module.as_xm().is_none());
        assert!(module.as_symmod().is_some());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ModuleFormat::Xm.name(), "XM");
        assert_eq!(ModuleFormat::SymMod.name(), "SymMOD");
    }
}
