// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod endpoints;
pub mod phase;
pub mod updater;

#[cfg(test)]
mod tests;

pub use phase::UpdatePhase;
pub use updater::PageLayoutUpdater;
