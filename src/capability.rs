//! Decoder for the service capability mask.
//!
//! A music service indicates to the controller that it can handle, or
//! requires, certain functionality by setting bits in an integer mask
//! delivered with the service's listing data. This module turns that
//! integer into named booleans and a set of capability names. It is a
//! boundary data adapter: nothing else in the crate depends on it.

use std::collections::BTreeSet;
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The documented bits of the capability mask. Bits outside this table
    /// are ignored on decode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CapabilityFlags: u32 {
        const SEARCH = 1;
        const FAVORITES_TRACKS = 1 << 1;
        const FAVORITES_ALBUMS = 1 << 4;
        const PLAYBACK_LOGGING = 1 << 6;
        const EXTENDED_METADATA = 1 << 9;
        const DISABLE_ALARM_SUPPORT = 1 << 10;
        const USER_CONTENT_PLAYLISTS = 1 << 11;
        const EVENT_AND_DURATION_LOGGING_DURING_PLAYBACK = 1 << 12;
        const ACCOUNT_LOGGING = 1 << 13;
        const DISABLE_MULTIPLE_ACCOUNT_SUPPORT = 1 << 14;
        const SUPPORT_ACTIONS = 1 << 15;
        const INCLUDE_SMAPI_CONTEXT = 1 << 16;
        const REQUIRES_DEVICE_CERTIFICATE = 1 << 17;
        const INCLUDE_ZONE_PLAYER_IDS = 1 << 18;
        const ADD_PLAY_CONTEXT_TO_REPORTING = 1 << 19;
    }
}

// The wire names are the vendor's, awkward casing included.
const NAMED_FLAGS: [(CapabilityFlags, &str); 15] = [
    (CapabilityFlags::SEARCH, "search"),
    (CapabilityFlags::FAVORITES_TRACKS, "favoritestracks"),
    (CapabilityFlags::FAVORITES_ALBUMS, "favoritesalbums"),
    (CapabilityFlags::PLAYBACK_LOGGING, "playbacklogging"),
    (CapabilityFlags::EXTENDED_METADATA, "extendedmetadata"),
    (CapabilityFlags::DISABLE_ALARM_SUPPORT, "disablealarmsupport"),
    (CapabilityFlags::USER_CONTENT_PLAYLISTS, "usercontentplaylists"),
    (
        CapabilityFlags::EVENT_AND_DURATION_LOGGING_DURING_PLAYBACK,
        "eventanddurationloggingduringplayback",
    ),
    (CapabilityFlags::ACCOUNT_LOGGING, "accountlogging"),
    (
        CapabilityFlags::DISABLE_MULTIPLE_ACCOUNT_SUPPORT,
        "disablemultipleaccountsupport",
    ),
    (CapabilityFlags::SUPPORT_ACTIONS, "supportactions"),
    (CapabilityFlags::INCLUDE_SMAPI_CONTEXT, "includeSMAPIcontext"),
    (
        CapabilityFlags::REQUIRES_DEVICE_CERTIFICATE,
        "requiresdevicecertificate",
    ),
    (CapabilityFlags::INCLUDE_ZONE_PLAYER_IDS, "includezoneplayerIDs"),
    (
        CapabilityFlags::ADD_PLAY_CONTEXT_TO_REPORTING,
        "addplaycontexttoreporting",
    ),
];

/// A decoded capability mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    number: u32,
    flags: CapabilityFlags,
}

impl Capabilities {
    pub fn new(capability_number: u32) -> Self {
        Self {
            number: capability_number,
            flags: CapabilityFlags::from_bits_truncate(capability_number),
        }
    }
    /// The mask as supplied, undocumented bits included.
    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// The service can be searched.
    pub fn search(&self) -> bool {
        self.flags.contains(CapabilityFlags::SEARCH)
    }
    /// Tracks from this service can be favorited.
    pub fn favorites_tracks(&self) -> bool {
        self.flags.contains(CapabilityFlags::FAVORITES_TRACKS)
    }
    /// Albums from this service can be favorited.
    pub fn favorites_albums(&self) -> bool {
        self.flags.contains(CapabilityFlags::FAVORITES_ALBUMS)
    }
    /// The controller should report when a track has finished playing.
    pub fn playback_logging(&self) -> bool {
        self.flags.contains(CapabilityFlags::PLAYBACK_LOGGING)
    }
    /// The controller may make calls for extended metadata.
    pub fn extended_metadata(&self) -> bool {
        self.flags.contains(CapabilityFlags::EXTENDED_METADATA)
    }
    /// Content should not be used for alarms, e.g. transient streams.
    pub fn disable_alarm_support(&self) -> bool {
        self.flags.contains(CapabilityFlags::DISABLE_ALARM_SUPPORT)
    }
    /// The user can edit playlists.
    pub fn user_content_playlists(&self) -> bool {
        self.flags.contains(CapabilityFlags::USER_CONTENT_PLAYLISTS)
    }
    /// The controller should report seconds played during playback.
    pub fn event_and_duration_logging_during_playback(&self) -> bool {
        self.flags
            .contains(CapabilityFlags::EVENT_AND_DURATION_LOGGING_DURING_PLAYBACK)
    }
    /// The controller should report the addition of an account.
    pub fn account_logging(&self) -> bool {
        self.flags.contains(CapabilityFlags::ACCOUNT_LOGGING)
    }
    /// No more than one account may be associated with the service.
    pub fn disable_multiple_account_support(&self) -> bool {
        self.flags
            .contains(CapabilityFlags::DISABLE_MULTIPLE_ACCOUNT_SUPPORT)
    }
    /// The service receives implicit or explicit actions for media requests.
    pub fn support_actions(&self) -> bool {
        self.flags.contains(CapabilityFlags::SUPPORT_ACTIONS)
    }
    /// Context headers accompany every service request.
    pub fn include_smapi_context(&self) -> bool {
        self.flags.contains(CapabilityFlags::INCLUDE_SMAPI_CONTEXT)
    }
    /// Requests carry a device certificate in their credentials.
    pub fn requires_device_certificate(&self) -> bool {
        self.flags
            .contains(CapabilityFlags::REQUIRES_DEVICE_CERTIFICATE)
    }
    /// Requests carry the player id of the sending player.
    pub fn include_zone_player_ids(&self) -> bool {
        self.flags.contains(CapabilityFlags::INCLUDE_ZONE_PLAYER_IDS)
    }
    /// Play-status reports carry a context id.
    pub fn add_play_context_to_reporting(&self) -> bool {
        self.flags
            .contains(CapabilityFlags::ADD_PLAY_CONTEXT_TO_REPORTING)
    }

    /// The set of capability names whose flag is set.
    pub fn as_set(&self) -> BTreeSet<&'static str> {
        NAMED_FLAGS
            .iter()
            .filter(|(flag, _)| self.flags.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.as_set())
    }
}
