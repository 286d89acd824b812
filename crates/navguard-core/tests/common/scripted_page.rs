//! Scripted navigation handle for retry-loop tests.
//!
//! Each navigation consumes the next [`Step`]; once the script runs out the
//! last step repeats. Every call is recorded so tests can assert on attempt
//! counts, reloads and the exact sleep schedule.

use navguard_core::page::{NavigationHandle, PageResponse, Readiness, TransportError};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of reading the title or body.
#[derive(Debug, Clone)]
pub enum Read {
    Text(String),
    Fails,
}

/// What a navigation step produces.
#[derive(Debug, Clone)]
pub enum Step {
    Load {
        status: Option<u16>,
        title: Read,
        body: Read,
    },
    Transport(String),
}

impl Step {
    /// Clean page with the given status.
    pub fn status(code: u16) -> Self {
        Step::Load {
            status: Some(code),
            title: Read::Text("DEMOQA".to_string()),
            body: Read::Text("Elements Forms Widgets".to_string()),
        }
    }

    pub fn titled(code: u16, title: &str) -> Self {
        Step::Load {
            status: Some(code),
            title: Read::Text(title.to_string()),
            body: Read::Text("Elements Forms Widgets".to_string()),
        }
    }

    pub fn body(code: u16, body: &str) -> Self {
        Step::Load {
            status: Some(code),
            title: Read::Text("DEMOQA".to_string()),
            body: Read::Text(body.to_string()),
        }
    }

    /// Page whose title and body reads both fail.
    pub fn unreadable(code: u16) -> Self {
        Step::Load {
            status: Some(code),
            title: Read::Fails,
            body: Read::Fails,
        }
    }

    pub fn no_status() -> Self {
        Step::Load {
            status: None,
            title: Read::Text("DEMOQA".to_string()),
            body: Read::Text("anchor".to_string()),
        }
    }

    pub fn transport(message: &str) -> Self {
        Step::Transport(message.to_string())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedPage {
    steps: VecDeque<Step>,
    last: Option<Step>,
    current: Option<(Read, Read)>,
    /// Make every reload fail.
    pub failing_reloads: bool,
    pub navigations: u32,
    pub reloads: u32,
    pub title_reads: u32,
    pub body_reads: u32,
    pub sleeps: Vec<Duration>,
    pub timeouts: Vec<Option<Duration>>,
    pub readiness: Vec<Readiness>,
    /// Ordered log of calls: "goto", "title", "body", "reload", "sleep".
    pub calls: Vec<&'static str>,
}

impl ScriptedPage {
    pub fn new<I: IntoIterator<Item = Step>>(steps: I) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_failing_reloads(mut self) -> Self {
        self.failing_reloads = true;
        self
    }

    fn next_step(&mut self) -> Step {
        match self.steps.pop_front() {
            Some(step) => {
                self.last = Some(step.clone());
                step
            }
            None => self
                .last
                .clone()
                .expect("scripted page needs at least one step"),
        }
    }
}

impl NavigationHandle for ScriptedPage {
    fn navigate_and_wait(
        &mut self,
        url: &str,
        readiness: Readiness,
        timeout: Option<Duration>,
    ) -> Result<PageResponse, TransportError> {
        self.calls.push("goto");
        self.navigations += 1;
        self.timeouts.push(timeout);
        self.readiness.push(readiness);
        self.current = None;
        match self.next_step() {
            Step::Load {
                status,
                title,
                body,
            } => {
                self.current = Some((title, body));
                Ok(PageResponse {
                    status,
                    url: url.to_string(),
                })
            }
            Step::Transport(message) => Err(TransportError::Other(message)),
        }
    }

    fn title(&mut self) -> Result<String, TransportError> {
        self.calls.push("title");
        self.title_reads += 1;
        match &self.current {
            Some((Read::Text(t), _)) => Ok(t.clone()),
            Some((Read::Fails, _)) => Err(TransportError::Other("title read failed".into())),
            None => Err(TransportError::NoDocument),
        }
    }

    fn body_text(&mut self) -> Result<String, TransportError> {
        self.calls.push("body");
        self.body_reads += 1;
        match &self.current {
            Some((_, Read::Text(b))) => Ok(b.clone()),
            Some((_, Read::Fails)) => Err(TransportError::Other("body read failed".into())),
            None => Err(TransportError::NoDocument),
        }
    }

    fn reload(&mut self, _readiness: Readiness) -> Result<(), TransportError> {
        self.calls.push("reload");
        self.reloads += 1;
        if self.failing_reloads {
            return Err(TransportError::Other("reload interrupted".into()));
        }
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.calls.push("sleep");
        self.sleeps.push(duration);
    }
}
