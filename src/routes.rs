//! Declarative route table and URL building.
//!
//! Destinations are looked up by name first; an unknown string is treated as a
//! literal path and a descriptor is synthesized for it (never requiring auth,
//! tab-ness derived from the fixed tab-root set). Business content of the
//! screens behind these paths is out of scope here.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub name: String,
    pub path: String,
    /// Reachable via persistent tab navigation rather than the push/pop stack.
    pub tab: bool,
    /// Requires an authenticated session.
    pub auth: bool,
}

impl RouteDescriptor {
    pub fn new(name: &str, path: &str, tab: bool, auth: bool) -> Self {
        Self { name: name.into(), path: path.into(), tab, auth }
    }
}

pub struct RouteTable {
    by_name: HashMap<String, RouteDescriptor>,
    tab_paths: HashSet<String>,
    login: String,
    home: String,
}

impl RouteTable {
    /// `login` and `home` are route names that must exist in `routes`; `home`
    /// is the default authenticated landing destination.
    pub fn new(routes: Vec<RouteDescriptor>, login: &str, home: &str) -> Self {
        let tab_paths = routes
            .iter()
            .filter(|r| r.tab)
            .map(|r| r.path.clone())
            .collect();
        let by_name = routes.into_iter().map(|r| (r.name.clone(), r)).collect();
        Self {
            by_name,
            tab_paths,
            login: login.to_string(),
            home: home.to_string(),
        }
    }

    /// The club-app table shared by both front-ends.
    pub fn club_default() -> Self {
        Self::new(
            vec![
                RouteDescriptor::new("login", "/pages/login/form", false, false),
                RouteDescriptor::new("register", "/pages/register/form", false, false),
                RouteDescriptor::new("clubsList", "/pages/clubs/list", true, false),
                RouteDescriptor::new("clubsDetail", "/pages/clubs/detail", false, false),
                RouteDescriptor::new("clubHome", "/pages/clubs/home", false, false),
                RouteDescriptor::new("activitiesList", "/pages/activities/list", true, false),
                RouteDescriptor::new("announcementsList", "/pages/announcements/list", true, false),
                RouteDescriptor::new("mineHome", "/pages/mine/memberships", true, true),
                RouteDescriptor::new("mineEdit", "/pages/mine/edit", false, true),
            ],
            "login",
            "clubsList",
        )
    }

    /// Name-preferred resolution with literal-path fallback.
    pub fn resolve(&self, name_or_path: &str) -> RouteDescriptor {
        if let Some(r) = self.by_name.get(name_or_path) {
            return r.clone();
        }
        RouteDescriptor {
            name: String::new(),
            path: name_or_path.to_string(),
            tab: self.is_tab_path(name_or_path),
            auth: false,
        }
    }

    pub fn is_tab_path(&self, path: &str) -> bool {
        self.tab_paths.contains(path)
    }

    pub fn login_path(&self) -> String {
        self.by_name
            .get(&self.login)
            .map(|r| r.path.clone())
            .unwrap_or_else(|| "/pages/login/form".to_string())
    }

    pub fn home_path(&self) -> String {
        self.by_name
            .get(&self.home)
            .map(|r| r.path.clone())
            .unwrap_or_else(|| self.login_path())
    }

    /// Final URL for a destination: resolved path plus encoded query string.
    pub fn url_of(&self, name_or_path: &str, params: &[(&str, &str)]) -> String {
        build_url(&self.resolve(name_or_path).path, params)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::club_default()
    }
}

/// Append a query string built from `params`, percent-encoded, preserving
/// insertion order. Empty `params` yields the bare path.
pub fn build_url(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let qs = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, qs)
}

/// Decode the query string of a built URL back into its pairs.
pub fn parse_query(url: &str) -> Vec<(String, String)> {
    let Some((_, qs)) = url.split_once('?') else {
        return Vec::new();
    };
    qs.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            (
                urlencoding::decode(k).map(|s| s.into_owned()).unwrap_or_default(),
                urlencoding::decode(v).map(|s| s.into_owned()).unwrap_or_default(),
            )
        })
        .collect()
}
