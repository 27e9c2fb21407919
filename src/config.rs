//! Compile-time configuration: timings, particle constants, page copy and the
//! email-delivery identifiers. Nothing here is read from the environment.

// --- Loading screen ----------------------------------------------------------

pub const LOADING_TICK_MS: u32 = 50;
/// Nominal time for the simulated load; the base step is derived from it.
pub const LOADING_DURATION_MS: f64 = 2500.0;
pub const LOADING_JITTER: f64 = 2.0; // extra random progress per tick, [0, JITTER)
pub const LOADING_FADE_DELAY_MS: u32 = 500;
pub const LOADING_REMOVE_DELAY_MS: u32 = 500;

// --- Particle field ----------------------------------------------------------

pub const PARTICLE_MAX: usize = 100;
pub const PARTICLE_SPACING_PX: f64 = 10.0; // one particle per N px of viewport width
pub const POINTER_RADIUS: f64 = 100.0;
pub const POINTER_FORCE: f64 = 0.01;
pub const LINK_DISTANCE: f64 = 120.0;
pub const LINK_MAX_ALPHA: f64 = 0.2;
pub const LINK_COLOR: &str = "rgba(139, 92, 246, 0.5)";

pub const PARTICLE_COLORS: [&str; 4] = [
    "rgba(139, 92, 246, 0.8)",  // purple
    "rgba(168, 85, 247, 0.6)",  // light purple
    "rgba(221, 214, 254, 0.4)", // lavender
    "rgba(245, 158, 11, 0.5)",  // gold
];

// --- Typewriter --------------------------------------------------------------

pub const TYPE_SPEED_MS: u32 = 100;
pub const DELETE_SPEED_MS: u32 = 50;
pub const PAUSE_AT_FULL_MS: u32 = 2000;
pub const PAUSE_AT_EMPTY_MS: u32 = 500;

pub const TYPEWRITER_TEXTS: &[&str] = &[
    "Aspiring Software Engineer",
    "Future Data Scientist",
    "ML Engineer in Making",
    "Full-Stack Developer",
    "Problem Solver + Code Creator",
    "Turning Data Into Insights",
    "Building Tomorrow's Technology",
    "Innovation Through Code ⚡",
];

// --- Reveal / counters -------------------------------------------------------

pub const REVEAL_SELECTORS: &[&str] = &[
    ".text-block",
    ".skill-category",
    ".timeline-item",
    ".internship-card",
    ".project-card",
    ".education-card",
    ".cert-card",
    ".honor-item",
    ".contact-item",
    ".contact-form-container",
    ".stat-item",
];
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const STAT_ITEM_CLASS: &str = "stat-item";
pub const COUNTER_DURATION_MS: f64 = 2000.0;
pub const COUNTER_FRAME_MS: f64 = 16.0;

// --- Navigation --------------------------------------------------------------

pub const NAV_SCROLL_OFFSET: f64 = 100.0;
pub const NAVBAR_SCROLLED_AFTER: f64 = 100.0;
pub const BACK_TO_TOP_AFTER: f64 = 500.0;

// --- Project filter ----------------------------------------------------------

pub const FILTER_ALL: &str = "all";
pub const FILTER_SHOW_DELAY_MS: u32 = 100;
pub const FILTER_HIDE_DELAY_MS: u32 = 300;

// --- Notifications -----------------------------------------------------------

pub const NOTIFY_ENTER_DELAY_MS: u32 = 100;
pub const NOTIFY_VISIBLE_MS: u32 = 5000;
pub const NOTIFY_EXIT_MS: u32 = 300;

// --- Orchestrator ------------------------------------------------------------

pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const CERT_SCROLL_DELAY_MS: u32 = 300;

// --- Email delivery ----------------------------------------------------------

/// Identifiers for the hosted email relay. These are public client-side values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmailConfig {
    pub service_id: &'static str,
    pub template_id: &'static str,
    pub public_key: &'static str,
    pub to_name: &'static str,
    pub to_email: &'static str,
}

pub const EMAIL: EmailConfig = EmailConfig {
    service_id: "service_wmfzdqo",
    template_id: "template_mwyb11j",
    public_key: "nHiGMiHoy_9Dy5CWt",
    to_name: "Erfan Nourbakhsh",
    to_email: "erfan.nourbakhsh@my.utsa.edu",
};
