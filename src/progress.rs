// src/progress.rs
/// Progress reporting for a retrieval run.
/// The CLI implements this to surface status to users.
pub trait Progress {
    /// Called before the rows are folded, with the number of table rows.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One table row handled (graded or not).
    fn item_done(&mut self, _subject: &str) {}

    /// One table row dropped because its mark cell was malformed.
    fn item_skipped(&mut self, _subject: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
