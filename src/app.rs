use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use reelgen::client::HttpVideoApi;
use reelgen::config::Config;
use reelgen::download::FileDownloads;
use reelgen::handler::SubmitOutcome;
use reelgen::page::{Page, PageOptions};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::GenerateArgs;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn generate(mut config: Config, args: GenerateArgs) -> Result<ExitCode, AnyError> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let script = read_script(args.script, args.file).await?;

    let api = HttpVideoApi::new(&config.client)?;
    let downloads = FileDownloads::from_config(&config.download);
    info!(
        endpoint = %api.endpoint(),
        output_dir = %downloads.output_dir().display(),
        "Submitting script"
    );

    let mut page = Page::mount(
        Arc::new(api),
        Arc::new(downloads),
        PageOptions {
            filename: config.download.filename.clone(),
            echo: true,
            ..PageOptions::default()
        },
    );
    page.script.set_value(script);

    let (_event, outcome) = page.submit().await;
    debug!(metrics = ?page.metrics.snapshot(), "Submission finished");

    if let Some(SubmitOutcome::Downloaded { path, .. }) = &outcome {
        println!("{}", path.display());
    }
    Ok(exit_code(outcome.as_ref()))
}

fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(server) = &args.server {
        config.client.base_url = server.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.download.output_dir = dir.clone();
    }
}

/// 0 only when the video was saved
fn exit_code(outcome: Option<&SubmitOutcome>) -> ExitCode {
    match outcome {
        Some(SubmitOutcome::Downloaded { .. }) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

async fn read_script(script: Option<String>, file: Option<PathBuf>) -> Result<String, AnyError> {
    if let Some(script) = script {
        return Ok(script);
    }

    if let Some(path) = file {
        return tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read script from {}: {}", path.display(), e).into());
    }

    let mut script = String::new();
    tokio::io::stdin().read_to_string(&mut script).await?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgen::client::ClientError;
    use reelgen::handler::SubmitError;
    use tempfile::TempDir;

    fn args() -> GenerateArgs {
        GenerateArgs {
            script: None,
            file: None,
            server: None,
            output_dir: None,
        }
    }

    #[test]
    fn test_exit_code_per_outcome() {
        let downloaded = SubmitOutcome::Downloaded {
            path: PathBuf::from("ai_generated_video.mp4"),
            bytes: 42,
        };
        let rejected = SubmitOutcome::ServerError {
            status: 400,
            message: "Error: Script is empty.".to_string(),
        };
        let failed = SubmitOutcome::Failed(SubmitError::Client(ClientError::Timeout));

        assert_eq!(exit_code(Some(&downloaded)), ExitCode::SUCCESS);
        assert_eq!(exit_code(Some(&SubmitOutcome::EmptyScript)), ExitCode::FAILURE);
        assert_eq!(exit_code(Some(&rejected)), ExitCode::FAILURE);
        assert_eq!(exit_code(Some(&failed)), ExitCode::FAILURE);
        assert_eq!(exit_code(None), ExitCode::FAILURE);
    }

    #[test]
    fn test_server_override_replaces_invalid_base_url() {
        let mut config = Config::default();
        config.client.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let args = GenerateArgs {
            server: Some("http://localhost:9000".to_string()),
            output_dir: Some(PathBuf::from("out")),
            ..args()
        };
        apply_overrides(&mut config, &args);

        assert!(config.validate().is_ok());
        assert_eq!(config.client.base_url, "http://localhost:9000");
        assert_eq!(config.download.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args());

        assert_eq!(config.client.base_url, Config::default().client.base_url);
        assert_eq!(config.download.output_dir, Config::default().download.output_dir);
    }

    #[tokio::test]
    async fn test_script_argument_wins() {
        let script = read_script(
            Some("[peter]: hi".to_string()),
            Some(PathBuf::from("/nonexistent/script.txt")),
        )
        .await
        .unwrap();

        assert_eq!(script, "[peter]: hi");
    }

    #[tokio::test]
    async fn test_script_read_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("script.txt");
        std::fs::write(&path, "[peter]: hey brian\n[brian]: hello\n").unwrap();

        let script = read_script(None, Some(path)).await.unwrap();

        assert_eq!(script, "[peter]: hey brian\n[brian]: hello\n");
    }

    #[tokio::test]
    async fn test_missing_script_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let err = read_script(None, Some(path.clone())).await.unwrap_err();

        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
