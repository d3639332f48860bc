//! Shows the rendered chart and waits for the user to dismiss it.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::CliError;
use crate::render::RenderError;

/// Something that can display a chart file.
pub trait ChartViewer {
    fn open(&self, path: &Path) -> Result<(), RenderError>;
}

/// Desktop default application for the file type.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl ChartViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), RenderError> {
        opener::open(path).map_err(|error| RenderError::Viewer {
            path: path.display().to_string(),
            message: error.to_string(),
        })
    }
}

/// Opens `path` in `viewer`, then blocks until a line (or EOF) arrives on `input`.
pub fn show_and_wait<R: BufRead, W: Write>(
    viewer: &dyn ChartViewer,
    path: &Path,
    mut input: R,
    mut output: W,
) -> Result<(), CliError> {
    viewer.open(path)?;
    tracing::info!(path = %path.display(), "chart opened in viewer");

    write!(
        output,
        "Chart opened in the system viewer ({}). Close it and press Enter to exit. ",
        path.display()
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingViewer {
        opened: RefCell<Vec<PathBuf>>,
        fail: bool,
    }

    impl ChartViewer for RecordingViewer {
        fn open(&self, path: &Path) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::Viewer {
                    path: path.display().to_string(),
                    message: String::from("no display"),
                });
            }
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn opens_then_waits_for_enter() {
        let viewer = RecordingViewer::default();
        let mut output = Vec::new();
        let mut input = Cursor::new(b"\nleftover\n".to_vec());

        show_and_wait(&viewer, Path::new("chart.svg"), &mut input, &mut output)
            .expect("viewer opens");

        assert_eq!(*viewer.opened.borrow(), vec![PathBuf::from("chart.svg")]);
        let text = String::from_utf8(output).expect("utf-8");
        assert!(text.contains("(chart.svg)"));
        assert!(text.contains("press Enter to exit"));
        assert_eq!(input.position(), 1, "only the dismissing line is consumed");
    }

    #[test]
    fn closed_input_counts_as_dismissal() {
        let viewer = RecordingViewer::default();
        show_and_wait(&viewer, Path::new("chart.svg"), Cursor::new(Vec::new()), Vec::new())
            .expect("eof dismisses");
    }

    #[test]
    fn viewer_failure_is_reported_without_waiting() {
        let viewer = RecordingViewer {
            fail: true,
            ..RecordingViewer::default()
        };
        let mut output = Vec::new();

        let error = show_and_wait(
            &viewer,
            Path::new("chart.svg"),
            Cursor::new(Vec::new()),
            &mut output,
        )
        .expect_err("viewer fails");

        assert!(matches!(error, CliError::Render(RenderError::Viewer { .. })));
        assert_eq!(error.exit_code(), 4);
        assert!(output.is_empty());
    }
}
