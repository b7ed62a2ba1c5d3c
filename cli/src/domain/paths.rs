//! Resource paths on the controller and router.

pub const APPS: &str = "/apps";
pub const RELEASES: &str = "/releases";
pub const ROUTES: &str = "/routes";

#[must_use]
pub fn app(app_id: &str) -> String {
    format!("{APPS}/{app_id}")
}

#[must_use]
pub fn app_jobs(app_id: &str) -> String {
    format!("{}/jobs", app(app_id))
}

#[must_use]
pub fn app_job(app_id: &str, job_id: &str) -> String {
    format!("{}/{job_id}", app_jobs(app_id))
}

#[must_use]
pub fn app_formations(app_id: &str) -> String {
    format!("{}/formations", app(app_id))
}

/// Formations are addressed by the id of the release they are bound to.
#[must_use]
pub fn app_formation(app_id: &str, release_id: &str) -> String {
    format!("{}/{release_id}", app_formations(app_id))
}

#[must_use]
pub fn app_release(app_id: &str) -> String {
    format!("{}/release", app(app_id))
}

#[must_use]
pub fn app_log(app_id: &str) -> String {
    format!("{}/log", app(app_id))
}

#[must_use]
pub fn route(route_id: &str) -> String {
    format!("{ROUTES}/{route_id}")
}
