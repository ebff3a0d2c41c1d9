//! Progress reporting.
//!
//! The workload loop only knows about the [`Reporter`] trait. [`Progress`] is
//! the terminal bar shipped with this crate, and [`NoProgress`] silently
//! discards every advancement.

use crate::error::Error;
use std::io::{Stdout, Write};
use std::time::{Duration, Instant};
use terminal_size::{terminal_size_of, Width};

/// Assumed width when we aren't attached to a terminal.
const DEFAULT_WIDTH: usize = 100;

/// Below this the bar and its label can no longer share a line.
const MIN_WIDTH: usize = 40;

/// Something to be notified as units of work complete.
pub trait Reporter {
    /// Note that `n` more units of work have completed.
    fn advance(&mut self, n: usize) -> Result<(), Error>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn advance(&mut self, n: usize) -> Result<(), Error> {
        (**self).advance(n)
    }
}

/// A [`Reporter`] that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Reporter for NoProgress {
    fn advance(&mut self, _n: usize) -> Result<(), Error> {
        Ok(())
    }
}

/// A single progress bar, redrawn in place.
///
/// ```
/// use slowbar::Progress;
///
/// let mut progress = Progress::with_writer(Vec::new(), Some(80), 50, "Downloading").unwrap();
/// progress.inc_and_draw(10).unwrap();
/// assert_eq!(10, progress.position());
/// assert!(!progress.is_done());
/// ```
pub struct Progress<W: Write = Stdout> {
    /// Where the bar is drawn.
    out: W,
    /// Terminal width. `None` if we aren't running in a terminal.
    width: Option<usize>,
    curr: usize,
    total: usize,
    label: String,
    started: Instant,
    /// Set once the closing line has been written without a terminal.
    closed: bool,
}

impl Progress<Stdout> {
    /// Create a bar on `stdout`, sized to the current terminal.
    pub fn new<S: Into<String>>(total: usize, label: S) -> Result<Progress<Stdout>, Error> {
        let out = std::io::stdout();
        let width = terminal_size_of(&out).map(|(Width(w), _)| w as usize);
        Progress::with_writer(out, width, total, label)
    }
}

impl<W: Write> Progress<W> {
    /// Create a bar drawn to an arbitrary writer.
    ///
    /// A `width` of `None` means the output is not a terminal, so the bar
    /// can't be redrawn in place. In that case only the initial empty bar and
    /// a final completed one are written.
    pub fn with_writer<S: Into<String>>(
        out: W,
        width: Option<usize>,
        total: usize,
        label: S,
    ) -> Result<Progress<W>, Error> {
        let mut progress = Progress {
            out,
            width,
            curr: 0,
            total,
            label: label.into(),
            started: Instant::now(),
            closed: false,
        };
        let (l, w) = layout(width.unwrap_or(DEFAULT_WIDTH));

        // An initial rendering of the new bar, already full if there's nothing to do.
        let line = if progress.is_done() {
            progress.closed = true;
            progress.line(l, w)
        } else {
            format!(
                "{:<l$.l$} [{:->w$}] {:>3}% {}",
                progress.label,
                "",
                0,
                eta_str(None),
                l = l,
                w = w
            )
        };
        writeln!(progress.out, "{}", line)?;
        progress.out.flush()?;

        Ok(progress)
    }

    /// Set the bar's progress value, but don't draw it.
    pub fn set(&mut self, value: usize) {
        self.curr = value;
    }

    /// Increment the bar's progress, but don't draw it.
    pub fn inc(&mut self, value: usize) {
        self.set(self.curr.saturating_add(value))
    }

    /// Force the drawing of the bar.
    ///
    /// **Note:** If your program is not being run in a terminal, an initial
    /// empty bar will be printed, and then nothing more until the bar
    /// completes.
    pub fn draw(&mut self) -> Result<(), Error> {
        match self.width {
            Some(term_width) => {
                let (l, w) = layout(term_width);
                let line = self.line(l, w);
                write!(self.out, "\x1B[s\x1B[1A\r{}\x1B[u\r", line)?;
            }
            None if self.is_done() && !self.closed => {
                let (l, w) = layout(DEFAULT_WIDTH);
                let line = self.line(l, w);
                writeln!(self.out, "{}", line)?;
                self.closed = true;
            }
            None => return Ok(()),
        }

        // Very important, or the output won't appear fluid.
        self.out.flush()?;
        Ok(())
    }

    /// Set the bar's value and immediately try to draw it.
    pub fn set_and_draw(&mut self, value: usize) -> Result<(), Error> {
        self.set(value);
        self.draw()
    }

    /// Increment the bar's progress and immediately try to draw it.
    pub fn inc_and_draw(&mut self, value: usize) -> Result<(), Error> {
        self.inc(value);
        self.draw()
    }

    /// Has the bar completed? A bar with a total of zero always has.
    pub fn is_done(&self) -> bool {
        self.curr >= self.total
    }

    /// The current progress value.
    pub fn position(&self) -> usize {
        self.curr
    }

    /// The value at which the bar is complete.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&self, l: usize, w: usize) -> String {
        if self.is_done() {
            format!(
                "{:<l$.l$} [{:#>w$}] 100% {}",
                self.label,
                "",
                eta_str(Some(Duration::ZERO)),
                l = l,
                w = w
            )
        } else {
            let f = (w * self.curr / self.total).min(w - 1);
            let e = (w - 1) - f;
            let eta = estimate(self.started.elapsed(), self.curr, self.total);

            format!(
                "{:<l$.l$} [{:#>f$}{}{:->e$}] {:>3}% {}",
                self.label,
                "",
                '>',
                "",
                100 * self.curr / self.total,
                eta_str(eta),
                l = l,
                f = f,
                e = e
            )
        }
    }
}

impl<W: Write> Reporter for Progress<W> {
    fn advance(&mut self, n: usize) -> Result<(), Error> {
        self.inc_and_draw(n)
    }
}

/// Label and bar widths for a given terminal width.
fn layout(term_width: usize) -> (usize, usize) {
    let term_width = term_width.max(MIN_WIDTH);
    let w = (term_width / 2) - 7;
    // Room for the brackets, percentage and ETA, plus one spare column.
    let l = term_width - w - 15;
    (l, w)
}

/// Remaining time, extrapolated linearly from the time taken so far.
fn estimate(elapsed: Duration, curr: usize, total: usize) -> Option<Duration> {
    if curr == 0 || curr >= total {
        return None;
    }

    let remaining = (total - curr) as f64 / curr as f64;
    Some(elapsed.mul_f64(remaining))
}

fn eta_str(eta: Option<Duration>) -> String {
    match eta {
        None => "--:--".to_string(),
        Some(d) => {
            let secs = d.as_secs().min(99 * 60 + 59);
            format!("{:02}:{:02}", secs / 60, secs % 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(progress: Progress<Vec<u8>>) -> String {
        String::from_utf8(progress.into_inner()).unwrap()
    }

    #[test]
    fn layout_fits_terminal() {
        for width in [MIN_WIDTH, 80, 120, 200] {
            let (l, w) = layout(width);
            // label, " [", bar, "] ", "NNN%", " ", "mm:ss"
            assert!(l + 2 + w + 2 + 4 + 1 + 5 < width);
        }
    }

    #[test]
    fn narrow_terminals_are_clamped() {
        assert_eq!(layout(MIN_WIDTH), layout(10));
    }

    #[test]
    fn eta_formatting() {
        assert_eq!("--:--", eta_str(None));
        assert_eq!("00:00", eta_str(Some(Duration::ZERO)));
        assert_eq!("01:05", eta_str(Some(Duration::from_secs(65))));
        assert_eq!("99:59", eta_str(Some(Duration::from_secs(100_000))));
    }

    #[test]
    fn eta_extrapolation() {
        let elapsed = Duration::from_secs(10);
        assert_eq!(None, estimate(elapsed, 0, 100));
        assert_eq!(None, estimate(elapsed, 100, 100));
        assert_eq!(Some(Duration::from_secs(30)), estimate(elapsed, 25, 100));
    }

    #[test]
    fn initial_bar_is_empty() {
        let progress = Progress::with_writer(Vec::new(), Some(80), 10, "Working").unwrap();
        let out = output(progress);
        let (_, w) = layout(80);

        assert!(out.starts_with("Working"));
        assert!(out.contains(&format!("[{}]", "-".repeat(w))));
        assert!(out.ends_with("  0% --:--\n"));
    }

    #[test]
    fn long_labels_are_truncated() {
        let label = "x".repeat(200);
        let progress = Progress::with_writer(Vec::new(), Some(80), 10, label).unwrap();
        let out = output(progress);
        let (l, _) = layout(80);

        assert!(out.starts_with(&format!("{} [", "x".repeat(l))));
    }

    #[test]
    fn redraws_in_place() {
        let mut progress = Progress::with_writer(Vec::new(), Some(80), 2, "Working").unwrap();
        progress.inc_and_draw(1).unwrap();
        let out = output(progress);

        assert!(out.contains("\x1B[s\x1B[1A\r"));
        assert!(out.contains(" 50% "));
        assert!(out.ends_with("\x1B[u\r"));
    }

    #[test]
    fn completes() {
        let mut progress = Progress::with_writer(Vec::new(), Some(80), 3, "Working").unwrap();
        for _ in 0..3 {
            progress.advance(1).unwrap();
        }
        assert!(progress.is_done());
        assert_eq!(3, progress.position());

        let out = output(progress);
        let (_, w) = layout(80);
        assert!(out.contains(&format!("[{}] 100% 00:00", "#".repeat(w))));
    }

    #[test]
    fn bar_never_overflows() {
        let mut progress = Progress::with_writer(Vec::new(), Some(80), 3, "Working").unwrap();
        progress.set_and_draw(10).unwrap();
        assert!(progress.is_done());

        let out = output(progress);
        assert!(out.contains("100%"));
        assert!(!out.contains(">"));
    }

    #[test]
    fn no_terminal_writes_only_first_and_last() {
        let mut progress = Progress::with_writer(Vec::new(), None, 4, "Working").unwrap();
        for _ in 0..4 {
            progress.inc_and_draw(1).unwrap();
        }
        // Further draws after completion write nothing.
        progress.draw().unwrap();

        let out = output(progress);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].ends_with("  0% --:--"));
        assert!(lines[1].ends_with("100% 00:00"));
        assert!(!out.contains('\x1B'));
    }

    #[test]
    fn empty_bar_is_done() {
        let progress = Progress::with_writer(Vec::new(), Some(80), 0, "Nothing").unwrap();
        assert!(progress.is_done());
        assert_eq!(0, progress.total());

        let out = output(progress);
        let (_, w) = layout(80);
        assert_eq!(1, out.lines().count());
        assert!(out.contains(&format!("[{}] 100% 00:00", "#".repeat(w))));
        assert!(!out.contains("0% --:--"));
    }

    #[test]
    fn empty_bar_without_terminal_is_drawn_once() {
        let mut progress = Progress::with_writer(Vec::new(), None, 0, "Nothing").unwrap();
        progress.draw().unwrap();

        let out = output(progress);
        assert_eq!(1, out.lines().count());
        assert!(out.ends_with("100% 00:00\n"));
    }

    #[test]
    fn lent_reporters_advance() {
        fn bump<R: Reporter>(mut reporter: R) {
            reporter.advance(2).unwrap();
        }

        let mut progress = Progress::with_writer(Vec::new(), Some(80), 5, "Working").unwrap();
        bump(&mut progress);
        assert_eq!(2, progress.position());
    }
}
