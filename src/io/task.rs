// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! One-shot background work polled from the UI thread.
//!
//! The UI never blocks on the network or on image decoding: work runs on a
//! spawned thread and its result is picked up by `try_take` on a later frame.

use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// A single unit of background work producing a `T` or an `E`.
pub struct BackgroundTask<T, E = String> {
    receiver: Receiver<Result<T, E>>,
}

impl<T, E> BackgroundTask<T, E>
where
    T: Send + 'static,
    E: From<String> + Send + 'static,
{
    /// Run `work` on a new thread.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (sender, receiver) = channel();
        std::thread::spawn(move || {
            let _ = sender.send(work());
        });
        Self { receiver }
    }

    /// Take the result if the work has finished.
    ///
    /// A worker that died without reporting is turned into an error.
    pub fn try_take(&self) -> Option<Result<T, E>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(E::from("Background task stopped unexpectedly".to_string())))
            }
        }
    }

    /// A task that has already finished with `result`.
    #[cfg(test)]
    pub fn ready(result: Result<T, E>) -> Self {
        let (sender, receiver) = channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// Block until the work finishes.
    #[cfg(test)]
    pub fn wait(self) -> Result<T, E> {
        self.receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .map_err(|e| E::from(e.to_string()))?
    }
}
