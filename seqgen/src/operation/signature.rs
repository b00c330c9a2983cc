//! Member signature text: `Declaring.name(T1,T2)`.

use once_cell::sync::Lazy;
use regex::Regex;
use seqgen_runtime::{TypeDescriptor, TypeResolver};

use crate::error::ParseError;

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<class>[^\s(),<>]+)\.(?P<name><init>|[A-Za-z_$][A-Za-z0-9_$]*)\((?P<params>[^()]*)\)$",
    )
    .expect("signature pattern is valid")
});

/// Signature text with every type name resolved.
#[derive(Debug)]
pub(super) struct ResolvedSignature {
    pub declaring: TypeDescriptor,
    pub name: String,
    pub params: Vec<TypeDescriptor>,
}

impl ResolvedSignature {
    /// Normalized text, the key members are registered under
    pub fn canonical_text(&self) -> String {
        let params: Vec<&str> = self.params.iter().map(|p| p.name()).collect();
        format!("{}.{}({})", self.declaring.name(), self.name, params.join(","))
    }
}

pub(super) fn parse_signature<R>(text: &str, resolver: &R) -> Result<ResolvedSignature, ParseError>
where
    R: TypeResolver + ?Sized,
{
    let caps = SIGNATURE
        .captures(text)
        .ok_or_else(|| ParseError::malformed(text, "expected 'Class.name(T1,T2)'"))?;

    let declaring = resolver.resolve(&caps["class"])?;
    let params_text = caps["params"].trim();
    let params = if params_text.is_empty() {
        Vec::new()
    } else {
        params_text
            .split(',')
            .map(|p| match p.trim() {
                "" => Err(ParseError::malformed(text, "empty parameter type")),
                name => Ok(resolver.resolve(name)?),
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(ResolvedSignature {
        declaring,
        name: caps["name"].to_string(),
        params,
    })
}
