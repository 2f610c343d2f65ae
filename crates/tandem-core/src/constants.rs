/// Route components of the remote scheduling API
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const LOGIN_ROUTE: &str = const_str::concat!(API_ROUTE_PREFIX, "/login");

pub const AGENTS_ROUTE_COMPONENT: &str = "agents";
pub const AGENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", AGENTS_ROUTE_COMPONENT);

pub const AGENTS_LIST_ROUTE: &str = const_str::concat!(AGENTS_ROUTE_PREFIX, "/get");
pub const AGENTS_CREATE_ROUTE: &str = const_str::concat!(AGENTS_ROUTE_PREFIX, "/create");
pub const AGENTS_UPDATE_ROUTE: &str = const_str::concat!(AGENTS_ROUTE_PREFIX, "/update");
pub const AGENTS_DELETE_ROUTE: &str = const_str::concat!(AGENTS_ROUTE_PREFIX, "/delete");
pub const AGENTS_AVAILABILITY_UPDATE_ROUTE: &str =
    const_str::concat!(AGENTS_ROUTE_PREFIX, "/availability/update");

pub const SCHEDULE_ROUTE_COMPONENT: &str = "schedule";
pub const SCHEDULE_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SCHEDULE_ROUTE_COMPONENT);

pub const SCHEDULE_GET_ROUTE: &str = const_str::concat!(SCHEDULE_ROUTE_PREFIX, "/get");
pub const SCHEDULE_SET_ROUTE: &str = const_str::concat!(SCHEDULE_ROUTE_PREFIX, "/set");
pub const SCHEDULE_GENERATE_ROUTE: &str = const_str::concat!(SCHEDULE_ROUTE_PREFIX, "/generate");

/// Wire format for the `date` query parameter and payload field
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Path of the availability resource for one agent.
#[must_use]
pub fn agent_availability_path(agent_id: i64) -> String {
    format!("{AGENTS_ROUTE_PREFIX}/{agent_id}/availability")
}
