//! Photo file types and the opaque storage reference.
//!
//! [`PhotoReference`] is the collision-free handle under which uploaded
//! bytes live: a random UUIDv4 stem plus a whitelisted extension. It is
//! never derived from the client-supplied filename, which keeps both
//! collisions and path-traversal characters out of the storage area.

use std::fmt;

/// Whitelisted photo file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoExtension {
    /// `.png`
    Png,
    /// `.jpg`
    Jpg,
    /// `.jpeg`
    Jpeg,
}

impl PhotoExtension {
    /// Extensions accepted for upload, in the form reported to clients.
    pub const ALLOWED: &'static [&'static str] = &["png", "jpg", "jpeg"];

    /// Parses an extension case-insensitively against the whitelist.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Canonical lowercase form used in stored references.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }

    /// MIME type for serving stored bytes back out.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg | Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for PhotoExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to stored photo bytes: `<uuid-simple>.<ext>`.
///
/// Generated once per accepted upload via [`PhotoReference::generate`].
/// [`PhotoReference::parse`] accepts only strings this crate could have
/// generated (32 lowercase hex characters, one dot, whitelisted
/// extension), so client-supplied lookup strings can never name a path
/// outside the storage area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoReference {
    name: String,
    extension: PhotoExtension,
}

/// Length of a UUIDv4 in simple (dashless) form.
const STEM_LEN: usize = 32;

impl PhotoReference {
    /// Generates a fresh random reference with the given extension.
    #[must_use]
    pub fn generate(extension: PhotoExtension) -> Self {
        let name = format!("{}.{}", uuid::Uuid::new_v4().simple(), extension.as_str());
        Self { name, extension }
    }

    /// Parses a reference string, rejecting anything this crate could not
    /// have generated.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (stem, ext) = raw.rsplit_once('.')?;
        if stem.len() != STEM_LEN {
            return None;
        }
        if !stem
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return None;
        }
        // Stored references use the canonical lowercase extension, so the
        // match here is exact rather than case-insensitive.
        let extension = match ext {
            "png" => PhotoExtension::Png,
            "jpg" => PhotoExtension::Jpg,
            "jpeg" => PhotoExtension::Jpeg,
            _ => return None,
        };
        Some(Self {
            name: raw.to_string(),
            extension,
        })
    }

    /// The full reference string, including the extension.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The reference's file extension.
    #[must_use]
    pub const fn extension(&self) -> PhotoExtension {
        self.extension
    }
}

impl fmt::Display for PhotoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
