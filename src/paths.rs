/// One known timeline shape: a field path from the `data` object (or the
/// document root) down to an instruction array, plus whether that shape is a
/// thread/conversation view.
#[derive(Debug, Clone, Copy)]
pub struct TimelinePath {
    pub segments: &'static [&'static str],
    pub thread: bool,
}

/// Every known sub-tree of interest. Each is probed independently; a missing
/// intermediate field just skips that path.
pub const TIMELINE_PATHS: &[TimelinePath] = &[
    // Home timeline
    TimelinePath {
        segments: &["home", "home_timeline_urt", "instructions"],
        thread: false,
    },
    // Thread / conversation views (two schema variants)
    TimelinePath {
        segments: &["threaded_conversation_with_injections_v2", "instructions"],
        thread: true,
    },
    TimelinePath {
        segments: &["threaded_conversation_with_injections", "instructions"],
        thread: true,
    },
    // Search
    TimelinePath {
        segments: &["search_by_raw_query", "search_timeline", "timeline", "instructions"],
        thread: false,
    },
    // User profile timelines (two schema variants)
    TimelinePath {
        segments: &["user", "result", "timeline_v2", "timeline", "instructions"],
        thread: false,
    },
    TimelinePath {
        segments: &["user", "result", "timeline", "timeline", "instructions"],
        thread: false,
    },
    // Generic top-level timeline
    TimelinePath {
        segments: &["timeline", "instructions"],
        thread: false,
    },
    // Bookmarks
    TimelinePath {
        segments: &["bookmark_folder", "timeline", "instructions"],
        thread: false,
    },
    // Lists
    TimelinePath {
        segments: &["list", "tweets_timeline", "timeline", "instructions"],
        thread: false,
    },
    // Favorites
    TimelinePath {
        segments: &["favorites_timeline", "instructions"],
        thread: false,
    },
];
