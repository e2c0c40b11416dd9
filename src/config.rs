// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::time::Duration;

pub const DEFAULT_PORTAL_URL: &str =
    "https://orobnat.sante.gouv.fr/orobnat/afficherPage.do?methode=menu&usd=AEP&idRegion=24";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    portal_url: String,
    max_sessions: usize,
    headless: bool,
    timeout: u64,
    listen_addr: String,
    show_progress: bool,
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            max_sessions: 4,
            headless: true,
            timeout: 30,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            show_progress: false,
        }
    }

    pub fn set_portal_url(&mut self, portal_url: String) {
        self.portal_url = portal_url;
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    /// Upper bound on concurrently open browser sessions. `0` lifts the
    /// bound: every department gets its session at once.
    pub fn set_max_sessions(&mut self, max_sessions: usize) {
        self.max_sessions = max_sessions;
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Number of department sessions to run side by side for `departments`
    /// pending departments. Never 0, so the fan-out always makes progress.
    pub fn session_limit(&self, departments: usize) -> usize {
        match self.max_sessions {
            0 => departments.max(1),
            limit => limit,
        }
    }

    pub fn set_headless(&mut self, headless: bool) {
        self.headless = headless;
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn set_listen_addr(&mut self, listen_addr: String) {
        self.listen_addr = listen_addr;
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn set_show_progress(&mut self, show_progress: bool) {
        self.show_progress = show_progress;
    }

    pub fn show_progress(&self) -> bool {
        self.show_progress
    }
}
