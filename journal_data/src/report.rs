use std::path::Path;

use crate::organize::{FileOutcome, Summary};

/// Observer for the progress of an organizing run.
///
/// Calls happen in order, on the thread running [`Organizer::run`](crate::Organizer::run): either a
/// single `inbox_missing`, or one `file` per processed entry followed by exactly one `finished`.
pub trait Reporter {
    fn inbox_missing(&mut self, inbox: &Path);
    fn file(&mut self, outcome: &FileOutcome);
    fn finished(&mut self, summary: &Summary);
}

/// Discards everything.
impl Reporter for () {
    fn inbox_missing(&mut self, _inbox: &Path) {}
    fn file(&mut self, _outcome: &FileOutcome) {}
    fn finished(&mut self, _summary: &Summary) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn inbox_missing(&mut self, inbox: &Path) {
        (**self).inbox_missing(inbox)
    }

    fn file(&mut self, outcome: &FileOutcome) {
        (**self).file(outcome)
    }

    fn finished(&mut self, summary: &Summary) {
        (**self).finished(summary)
    }
}
