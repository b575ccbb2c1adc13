//! Well-known mail providers and their submission servers.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Mail provider with a known SMTP submission host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Provider {
    /// Google Mail.
    Gmail,
    /// Yahoo Mail.
    Yahoo,
    /// Microsoft Outlook / Hotmail / Live.
    Outlook,
}

impl Provider {
    /// All known providers.
    pub const ALL: [Self; 3] = [Self::Gmail, Self::Yahoo, Self::Outlook];

    /// Returns the SMTP submission host.
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Gmail => "smtp.gmail.com",
            Self::Yahoo => "smtp.mail.yahoo.com",
            Self::Outlook => "smtp.live.com",
        }
    }

    /// Returns the SMTP submission port. Every provider uses 587.
    #[must_use]
    pub const fn port(self) -> u16 {
        easymail_smtp::SUBMISSION_PORT
    }

    /// Returns the provider's display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gmail => "Gmail",
            Self::Yahoo => "Yahoo",
            Self::Outlook => "Outlook",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }
}
