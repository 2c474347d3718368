use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::models::job::Job;

/// Where the scraped jobs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    /// `-` means stdout; anything else is a file path.
    pub fn parse(out: &str) -> Self {
        if out == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(out.to_string())
        }
    }
}

pub fn render(jobs: &[Job]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(jobs)?)
}

/// Write the jobs as a JSON array. File output also prints a one-line summary to stdout.
pub fn write_jobs(jobs: &[Job], target: &OutputTarget) -> Result<(), AppError> {
    let payload = render(jobs)?;
    let mut stdout = std::io::stdout().lock();

    match target {
        OutputTarget::Stdout => {
            writeln!(stdout, "{payload}")?;
        }
        OutputTarget::File(path) => {
            std::fs::write(Path::new(path), payload)?;
            writeln!(stdout, "Wrote {} jobs to {path}", jobs.len())?;
        }
    }

    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("jobs.json"),
            OutputTarget::File("jobs.json".into())
        );
    }

    #[test]
    fn writes_pretty_array_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        let jobs = vec![Job {
            job_url: "https://www.linkedin.com/jobs/view/1".into(),
            title: "Ingénieur".into(),
            company_name: "Acme".into(),
            description: Some("Build things".into()),
        }];

        write_jobs(&jobs, &OutputTarget::File(path.display().to_string())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Ingénieur"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0]["description"], "Build things");
    }

    #[test]
    fn empty_run_renders_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }
}
