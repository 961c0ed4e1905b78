//! Completion sound.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::SoundEffect;

/// Players tried in order; the first one that spawns wins.
const PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];

/// Plays the resource through a system audio player, falling back to the
/// terminal bell when the file or every player is missing.
///
/// Relative resources are looked up in the working directory first, then in
/// each search directory in order.
#[derive(Debug, Default, Clone)]
pub struct SystemSound {
    search_dirs: Vec<PathBuf>,
}

impl SystemSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Directory of the running executable, where packaged assets sit.
    pub fn executable_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }

    /// Locate `resource` on disk.
    pub fn resolve(&self, resource: &str) -> Option<PathBuf> {
        let path = Path::new(resource);
        if path.exists() {
            return Some(path.to_path_buf());
        }
        if path.is_absolute() {
            return None;
        }
        self.search_dirs
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
    }

    fn ring_bell() {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::warn!(error = %e, "failed to ring terminal bell");
        }
    }
}

impl SoundEffect for SystemSound {
    fn play(&mut self, resource: &str) {
        let Some(resource) = self.resolve(resource) else {
            tracing::debug!(resource, "sound resource missing, ringing bell");
            Self::ring_bell();
            return;
        };

        std::thread::spawn(move || {
            for player in PLAYERS {
                let spawned = Command::new(player)
                    .arg(&resource)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn();
                if let Ok(mut child) = spawned {
                    tracing::debug!(player, resource = %resource.display(), "playing completion sound");
                    let _ = child.wait();
                    return;
                }
            }
            tracing::warn!(resource = %resource.display(), "no audio player available");
        });
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundEffect for Silent {
    fn play(&mut self, _resource: &str) {}
}
