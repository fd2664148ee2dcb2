use serde::Serialize;

/// Display style for a converted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    Default,
    Atom,
    String,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedName {
    pub value: String,
    pub style: NameStyle,
}

impl ConvertedName {
    fn new(value: impl Into<String>, style: NameStyle) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }
}

const EXTRACT_PROTOTYPE: &str = "Compilerompiler_extractPrototype";

/// Turn a compiler-mangled identifier back into something readable.
///
/// `in_property_list` is set when the name is shown as an object key, where
/// property names are printed bare instead of quoted.
pub fn convert_name(value: &str, in_property_list: bool) -> ConvertedName {
    if let Some(prop) = value.strip_prefix("SETPROP_") {
        return ConvertedName::new(format!("(set {})", prop), NameStyle::Atom);
    }

    if let Some(prop) = value.strip_prefix("$$PROP_") {
        return if in_property_list {
            ConvertedName::new(prop, NameStyle::Default)
        } else {
            ConvertedName::new(format!("'{}'", prop), NameStyle::String)
        };
    }

    if let Some(global) = value.strip_prefix("GLOBAL_") {
        return ConvertedName::new(global, NameStyle::Default);
    }

    if let Some(alias) = value.strip_prefix("$$ALIAS_") {
        let alias = alias.to_lowercase();
        let style = if alias == "throw" {
            NameStyle::Keyword
        } else {
            NameStyle::Atom
        };
        return ConvertedName::new(alias, style);
    }

    if value == EXTRACT_PROTOTYPE {
        return ConvertedName::new("(current prototype)", NameStyle::Atom);
    }

    ConvertedName::new(collapse_dollars(value), NameStyle::Default)
}

/// Replace every run of `$` with a single `.`.
fn collapse_dollars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c == '$' {
            if !in_run {
                out.push('.');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
