//! Rich display glue for interactive hosts.
//!
//! A host (notebook kernel, viewer window, ...) implements [`DisplaySurface`]
//! and receives a [`MimeBundle`] restricted to the representations it accepts.

use std::fmt;
use std::str::FromStr;

use crate::error::{DisplayError, UnknownMimeType};

/// A representation of the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MimeType {
    /// `image/svg+xml`
    Svg,
    /// `image/png`
    Png,
}

impl MimeType {
    /// Every representation the simulator can produce.
    pub const ALL: [MimeType; 2] = [MimeType::Svg, MimeType::Png];

    /// The MIME string.
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Svg => "image/svg+xml",
            MimeType::Png => "image/png",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = UnknownMimeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MimeType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMimeType(s.to_string()))
    }
}

/// Borrowed payload of one representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MimeData<'a> {
    /// Textual payload (SVG).
    Text(&'a str),
    /// Binary payload (PNG).
    Bytes(&'a [u8]),
}

/// The drawing in every representation that was requested and available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeBundle {
    svg: Option<String>,
    png: Option<Vec<u8>>,
}

impl MimeBundle {
    /// Bundle from optional representations.
    pub fn new(svg: Option<String>, png: Option<Vec<u8>>) -> Self {
        MimeBundle { svg, png }
    }

    /// SVG text, if present.
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    /// PNG bytes, if present.
    pub fn png(&self) -> Option<&[u8]> {
        self.png.as_deref()
    }

    /// Payload for `mime`, if present.
    pub fn get(&self, mime: MimeType) -> Option<MimeData<'_>> {
        match mime {
            MimeType::Svg => self.svg().map(MimeData::Text),
            MimeType::Png => self.png().map(MimeData::Bytes),
        }
    }

    /// Representations present, in [`MimeType::ALL`] order.
    pub fn mime_types(&self) -> Vec<MimeType> {
        MimeType::ALL
            .into_iter()
            .filter(|m| self.get(*m).is_some())
            .collect()
    }

    /// First representation of `preference` that is present.
    pub fn preferred(&self, preference: &[MimeType]) -> Option<(MimeType, MimeData<'_>)> {
        preference
            .iter()
            .find_map(|m| self.get(*m).map(|data| (*m, data)))
    }

    /// Whether nothing is present.
    pub fn is_empty(&self) -> bool {
        self.svg.is_none() && self.png.is_none()
    }
}

/// Whether `mime` passes optional include and exclude filters.
pub(crate) fn wanted(
    mime: MimeType,
    include: Option<&[MimeType]>,
    exclude: Option<&[MimeType]>,
) -> bool {
    include.is_none_or(|i| i.contains(&mime)) && !exclude.is_some_and(|e| e.contains(&mime))
}

/// A host able to show drawings.
pub trait DisplaySurface {
    /// Representations the surface can show, most preferred first.
    fn accepts(&self) -> &[MimeType] {
        &MimeType::ALL
    }

    /// Shows `bundle`.
    fn display(&mut self, bundle: MimeBundle) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_strings_round_trip() {
        for mime in MimeType::ALL {
            assert_eq!(mime.as_str().parse::<MimeType>().unwrap(), mime);
        }
        assert!("text/html".parse::<MimeType>().is_err());
    }

    #[test]
    fn test_bundle_lookup_and_preference() {
        let bundle = MimeBundle::new(Some("<svg/>".to_string()), None);
        assert_eq!(bundle.mime_types(), vec![MimeType::Svg]);
        assert_eq!(bundle.get(MimeType::Svg), Some(MimeData::Text("<svg/>")));
        assert_eq!(bundle.get(MimeType::Png), None);
        assert_eq!(
            bundle.preferred(&[MimeType::Png, MimeType::Svg]).map(|(m, _)| m),
            Some(MimeType::Svg)
        );
        assert!(MimeBundle::default().is_empty());
    }

    #[test]
    fn test_include_exclude_filters() {
        assert!(wanted(MimeType::Png, None, None));
        assert!(!wanted(MimeType::Png, Some(&[MimeType::Svg]), None));
        assert!(!wanted(MimeType::Svg, None, Some(&[MimeType::Svg])));
        assert!(wanted(MimeType::Svg, Some(&MimeType::ALL), Some(&[MimeType::Png])));
    }
}
