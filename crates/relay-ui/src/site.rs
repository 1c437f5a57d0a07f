//! Active-tab classification.

/// What the popup can say about the site in the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    /// A chess.com page; moves are being tracked.
    Connected,
    /// lichess.org is recognised but not tracked yet.
    UnsupportedFeature,
    /// Anything else.
    UnsupportedSite,
}

/// Substring match against the known chess sites.
pub fn classify_url(url: &str) -> SiteStatus {
    if url.contains("chess.com") {
        SiteStatus::Connected
    } else if url.contains("lichess.org") {
        SiteStatus::UnsupportedFeature
    } else {
        SiteStatus::UnsupportedSite
    }
}

impl SiteStatus {
    pub fn message(self) -> &'static str {
        match self {
            SiteStatus::Connected => "Connected to chess.com",
            SiteStatus::UnsupportedFeature => "Lichess not yet supported",
            SiteStatus::UnsupportedSite => "Unsupported website",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chess_com_is_connected() {
        assert_eq!(
            classify_url("https://www.chess.com/game/live/98765"),
            SiteStatus::Connected
        );
    }

    #[test]
    fn test_lichess_is_unsupported_feature() {
        assert_eq!(
            classify_url("https://lichess.org/AbCdEfGh"),
            SiteStatus::UnsupportedFeature
        );
    }

    #[test]
    fn test_other_sites_are_unsupported() {
        assert_eq!(
            classify_url("https://example.org/chess"),
            SiteStatus::UnsupportedSite
        );
        assert_eq!(classify_url(""), SiteStatus::UnsupportedSite);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(SiteStatus::Connected.message(), "Connected to chess.com");
        assert_eq!(
            SiteStatus::UnsupportedFeature.message(),
            "Lichess not yet supported"
        );
        assert_eq!(SiteStatus::UnsupportedSite.message(), "Unsupported website");
    }
}
