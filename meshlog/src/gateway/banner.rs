//! Visual separators framing each rendered gateway event.

use std::fmt;

/// Width of every rule, in characters.
pub const RULE_WIDTH: usize = 80;

const BANNER_TITLE: &str = "GATEWAY EVENT";

/// A full-width horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `====`: opens and closes an event.
    Thick,
    /// `----`: separates sections inside an event.
    Thin,
    /// `>>>>`: frames traffic entering the mesh.
    Inbound,
    /// `<<<<`: frames traffic coming back from the mesh.
    Outbound,
    /// `####`: frames the event banner.
    Hash,
}

impl Rule {
    const fn fill(self) -> char {
        match self {
            Self::Thick => '=',
            Self::Thin => '-',
            Self::Inbound => '>',
            Self::Outbound => '<',
            Self::Hash => '#',
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fill = self.fill();
        for _ in 0..RULE_WIDTH {
            fmt::Write::write_char(f, fill)?;
        }
        Ok(())
    }
}

/// The three lines of the event banner: a hash rule, the boxed title, a hash rule.
#[must_use]
pub fn event_banner() -> [String; 3] {
    let inner = RULE_WIDTH - 2;
    let left = (inner - BANNER_TITLE.len()) / 2;
    let right = inner - BANNER_TITLE.len() - left;
    let title = format!("#{}{BANNER_TITLE}{}#", " ".repeat(left), " ".repeat(right));
    [Rule::Hash.to_string(), title, Rule::Hash.to_string()]
}
