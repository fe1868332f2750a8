//! Header rendering: synthetic members as Java-style declarations.
//!
//! Synthetic members have no bodies, so the rendering is a list of headers
//! grouped per declaration:
//!
//! ```text
//! // com.example.Pair<A, B>
//! public static final class µ implements Kind {}
//! public static <A, B> Pair<A, B> narrowK(Higher2<Pair.µ, A, B> hkt);
//! public Higher2<Pair.µ, A, B> kind2();
//! ```

use std::fmt::Write as FmtWrite;
use std::path::Path;

use kindgen_model::{Declaration, MethodHeader, Modifier, SyntheticMember, WitnessType};

/// Line buffer for a rendered header listing.
pub struct HeaderFile {
    /// Accumulated text.
    pub buf: String,
}

impl HeaderFile {
    /// Starts a listing with a leading `//` comment line.
    #[must_use]
    pub fn new(title: &str) -> Self {
        let mut f = Self { buf: String::new() };
        f.comment(title);
        f
    }

    /// Appends one line.
    pub fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Appends a `//` comment line.
    pub fn comment(&mut self, s: &str) {
        if s.is_empty() {
            self.line("//");
        } else {
            let _ = writeln!(self.buf, "// {s}");
        }
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Renders the members of one declaration.
#[must_use]
pub fn render_members(decl: &Declaration, members: &[SyntheticMember]) -> String {
    let mut f = HeaderFile::new(&declaration_title(decl));
    if members.is_empty() {
        f.comment("(no synthetic members)");
    }
    for member in members {
        f.line(&render_member(member));
    }
    f.finish()
}

/// Renders several declarations, separated by blank lines.
#[must_use]
pub fn render_all(results: &[(&Declaration, &[SyntheticMember])]) -> String {
    let blocks: Vec<String> = results
        .iter()
        .map(|(decl, members)| render_members(decl, members))
        .collect();
    blocks.join("\n")
}

/// Renders a single member header.
#[must_use]
pub fn render_member(member: &SyntheticMember) -> String {
    match member {
        SyntheticMember::Witness(w) => render_witness(w),
        SyntheticMember::Method(m) => render_method(m),
    }
}

fn render_witness(witness: &WitnessType) -> String {
    let mut s = modifiers(&witness.modifiers);
    let _ = write!(s, "class {}", witness.name);
    if !witness.implements.is_empty() {
        let caps: Vec<String> = witness.implements.iter().map(ToString::to_string).collect();
        let _ = write!(s, " implements {}", caps.join(", "));
    }
    s.push_str(" {}");
    s
}

fn render_method(method: &MethodHeader) -> String {
    let mut s = modifiers(&method.modifiers);
    if !method.type_parameters.is_empty() {
        let names: Vec<&str> = method
            .type_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        let _ = write!(s, "<{}> ", names.join(", "));
    }
    let _ = write!(s, "{} {}(", method.return_type, method.name);
    if let Some(param) = &method.parameter {
        let _ = write!(s, "{} {}", param.ty, param.name);
    }
    s.push_str(");");
    s
}

fn modifiers(modifiers: &[Modifier]) -> String {
    modifiers.iter().fold(String::new(), |mut s, m| {
        s.push_str(m.as_str());
        s.push(' ');
        s
    })
}

fn declaration_title(decl: &Declaration) -> String {
    if decl.type_parameters.is_empty() {
        return decl.qualified_name.clone();
    }
    let params: Vec<&str> = decl
        .type_parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    format!("{}<{}>", decl.qualified_name, params.join(", "))
}

/// Writes `content` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Synthesizer;
    use kindgen_model::{Config, Request, WellKnownNames};

    #[test]
    fn renders_scenario_a() {
        let s = Synthesizer::from_config(&Config::default());
        let decl = Declaration::new("com.example.Example", ["A"])
            .with_annotation(WellKnownNames::default().higher_kind);
        let mut members = s.synthesize(&decl, Request::Class).unwrap();
        members.extend(s.synthesize(&decl, Request::Methods).unwrap());

        let text = render_members(&decl, &members);
        assert_eq!(
            text,
            "// com.example.Example<A>\n\
             public static final class µ implements Kind {}\n\
             public static <A> Example<A> narrowK(Higher1<Example.µ, A> hkt);\n\
             public Higher1<Example.µ, A> kind1();\n"
        );
    }

    #[test]
    fn empty_member_list_is_noted() {
        let decl = Declaration::new("com.example.Plain", Vec::<&str>::new());
        assert_eq!(
            render_members(&decl, &[]),
            "// com.example.Plain\n// (no synthetic members)\n"
        );
    }
}
