use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, TradusError};
use crate::json::translate_json;
use crate::subtitle::translate_subtitle;
use crate::translate::{TranslationSummary, TranslatorProvider};

/// Suffix appended to the base name of every output file
pub const OUTPUT_SUFFIX: &str = "_translated";

/// Kind of document, decided by file extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Subtitle,
    Json,
}

impl DocumentKind {
    /// `.srt` (any case) is a subtitle; every other name is treated as JSON
    pub fn from_file_name(file_name: &str) -> Self {
        match split_file_name(file_name).1.as_deref() {
            Some(".srt") => DocumentKind::Subtitle,
            _ => DocumentKind::Json,
        }
    }

    /// Content-type hint for the exported file
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Subtitle => "text/plain",
            DocumentKind::Json => "application/json",
        }
    }
}

/// A translated file ready to be exported
#[derive(Debug, Clone)]
pub struct TranslatedFile {
    pub file_name: String,
    pub kind: DocumentKind,
    pub content: String,
    pub summary: TranslationSummary,
}

impl TranslatedFile {
    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }
}

/// Counts from a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    pub fell_back_units: usize,
}

/// Split a file name into its base name and lower-cased extension (with dot)
fn split_file_name(file_name: &str) -> (String, Option<String>) {
    let path = Path::new(file_name);
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()));
    (base, extension)
}

/// `{base}_translated{ext}`, with the extension lower-cased
pub fn output_file_name(file_name: &str) -> String {
    let (base, extension) = split_file_name(file_name);
    format!("{}{}{}", base, OUTPUT_SUFFIX, extension.unwrap_or_default())
}

pub struct Workflow {
    config: Config,
    translators: TranslatorProvider,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        let translators = TranslatorProvider::from_config(config.backend.clone());
        Self::with_provider(config, translators)
    }

    /// Workflow using a caller-supplied translator cache
    pub fn with_provider(config: Config, translators: TranslatorProvider) -> Self {
        Self { config, translators }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate raw file bytes. Invalid UTF-8 sequences are replaced
    /// rather than rejected.
    pub async fn translate_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        target_language: &str,
    ) -> Result<TranslatedFile> {
        let content = String::from_utf8_lossy(bytes);
        let kind = DocumentKind::from_file_name(file_name);

        if !self.config.languages.is_known(target_language) {
            warn!("Target language '{}' is not in the configured language list", target_language);
        }
        let translator = self.translators.get_translator(target_language)?;

        info!("Translating {} ({:?}) to {}", file_name, kind, target_language);
        let document = match kind {
            DocumentKind::Subtitle => {
                translate_subtitle(&content, &translator, &self.config.subtitle).await
            }
            DocumentKind::Json => translate_json(&content, &translator).await?,
        };

        Ok(TranslatedFile {
            file_name: output_file_name(file_name),
            kind,
            content: document.content,
            summary: document.summary,
        })
    }

    /// Translate one file and write the result next to it, or into `output_dir`
    pub async fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        target_language: &str,
        output_dir: Option<Q>,
    ) -> Result<(PathBuf, TranslatedFile)> {
        let input_path = input_path.as_ref();
        info!("Processing file: {}", input_path.display());

        if !input_path.is_file() {
            return Err(TradusError::FileNotFound(input_path.display().to_string()));
        }

        let file_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| TradusError::Config("Cannot determine file name".to_string()))?;

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_path.parent()
                .ok_or_else(|| TradusError::Config("Cannot determine output directory".to_string()))?
                .to_path_buf(),
        };

        let bytes = fs::read(input_path).await?;
        let translated = self.translate_bytes(&file_name, &bytes, target_language).await?;

        fs::create_dir_all(&output_dir).await?;
        let output_path = output_dir.join(&translated.file_name);
        fs::write(&output_path, &translated.content).await?;

        info!("Wrote {} ({}): {}", output_path.display(), translated.mime_type(), translated.summary);
        Ok((output_path, translated))
    }

    /// Translate every `.srt` and `.json` file under `input_dir`.
    ///
    /// A file that fails (for example malformed JSON) is logged and counted;
    /// the rest of the directory is still processed.
    pub async fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        target_language: &str,
        output_dir: Option<Q>,
    ) -> Result<BatchReport> {
        let input_dir = input_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(TradusError::Config("Input path is not a directory".to_string()));
        }

        let output_dir = output_dir.map(|dir| dir.as_ref().to_path_buf());

        let mut files = Vec::new();
        for entry in WalkDir::new(input_dir).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            match check_batch_candidate(entry.path()) {
                Ok(()) => files.push(entry.path().to_path_buf()),
                Err(e) => debug!("Skipping {}: {}", entry.path().display(), e),
            }
        }

        info!("Found {} files to translate", files.len());

        let mut report = BatchReport::default();
        for path in files {
            let target_dir = output_dir
                .as_ref()
                .map(|root| mirrored_output_dir(input_dir, &path, root));
            match self.process_file(&path, target_language, target_dir.as_ref()).await {
                Ok((output_path, translated)) => {
                    info!("Successfully processed: {} -> {}", path.display(), output_path.display());
                    report.processed += 1;
                    report.fell_back_units += translated.summary.fell_back;
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Check that the configured backend works for `target_language`
    pub async fn check_backend(&self, target_language: &str) -> Result<()> {
        let translator = self.translators.get_translator(target_language)?;
        translator.check_availability().await
    }
}

/// Directory under `output_root` matching the location of `path` below `input_dir`,
/// so same-named files from different folders never share an output path
fn mirrored_output_dir(input_dir: &Path, path: &Path, output_root: &Path) -> PathBuf {
    path.parent()
        .and_then(|parent| parent.strip_prefix(input_dir).ok())
        .map(|relative| output_root.join(relative))
        .unwrap_or_else(|| output_root.to_path_buf())
}

/// Only `.srt` and `.json` files that are not themselves outputs are batch inputs
fn check_batch_candidate(path: &Path) -> Result<()> {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let (base, extension) = split_file_name(&name);

    match extension.as_deref() {
        Some(".srt") | Some(".json") if !base.ends_with(OUTPUT_SUFFIX) => Ok(()),
        Some(".srt") | Some(".json") => Err(TradusError::UnsupportedFormat(
            "already a translation output".to_string(),
        )),
        _ => Err(TradusError::UnsupportedFormat(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockTranslationBackend, TranslationBackend};
    use crate::error::TradusError;

    fn uppercase_workflow() -> Workflow {
        let provider = TranslatorProvider::new(Box::new(|_target: &str| {
            let mut backend = MockTranslationBackend::new();
            backend.expect_translate().returning(|text| Ok(text.to_uppercase()));
            backend.expect_check_availability().returning(|| Ok(()));
            Ok(Box::new(backend) as Box<dyn TranslationBackend>)
        }));
        Workflow::with_provider(Config::default(), provider)
    }

    #[test]
    fn test_document_kind_routing() {
        assert_eq!(DocumentKind::from_file_name("movie.srt"), DocumentKind::Subtitle);
        assert_eq!(DocumentKind::from_file_name("MOVIE.SRT"), DocumentKind::Subtitle);
        assert_eq!(DocumentKind::from_file_name("strings.json"), DocumentKind::Json);
        assert_eq!(DocumentKind::from_file_name("notes.txt"), DocumentKind::Json);
        assert_eq!(DocumentKind::from_file_name("README"), DocumentKind::Json);
        assert_eq!(DocumentKind::Subtitle.mime_type(), "text/plain");
        assert_eq!(DocumentKind::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("movie.srt"), "movie_translated.srt");
        assert_eq!(output_file_name("Movie.SRT"), "Movie_translated.srt");
        assert_eq!(output_file_name("app.en.json"), "app.en_translated.json");
        assert_eq!(output_file_name("data"), "data_translated");
    }

    #[test]
    fn test_batch_candidates() {
        assert!(check_batch_candidate(Path::new("dir/a.srt")).is_ok());
        assert!(check_batch_candidate(Path::new("dir/b.JSON")).is_ok());
        assert!(matches!(
            check_batch_candidate(Path::new("dir/a_translated.srt")),
            Err(TradusError::UnsupportedFormat(_))
        ));
        assert!(check_batch_candidate(Path::new("dir/video.mp4")).is_err());
    }

    #[tokio::test]
    async fn test_translate_bytes_routes_subtitles() {
        let workflow = uppercase_workflow();
        let input = b"1\n00:00:01,000 --> 00:00:02,000\nHello\n";
        let file = workflow.translate_bytes("ep01.srt", input, "es").await.unwrap();

        assert_eq!(file.file_name, "ep01_translated.srt");
        assert_eq!(file.mime_type(), "text/plain");
        assert_eq!(file.content, "1\n00:00:01,000 --> 00:00:02,000\nHELLO\n");
    }

    #[tokio::test]
    async fn test_translate_bytes_routes_json() {
        let workflow = uppercase_workflow();
        let file = workflow.translate_bytes("ui.json", br#"{"ok": "yes"}"#, "es").await.unwrap();

        assert_eq!(file.file_name, "ui_translated.json");
        assert_eq!(file.mime_type(), "application/json");
        assert_eq!(file.content, "{\n    \"ok\": \"YES\"\n}");
    }

    #[tokio::test]
    async fn test_translate_bytes_replaces_invalid_utf8() {
        let workflow = uppercase_workflow();
        let file = workflow.translate_bytes("bad.srt", b"caf\xff\n", "es").await.unwrap();
        assert_eq!(file.content, "CAF\u{FFFD}\n");
    }

    #[tokio::test]
    async fn test_translate_bytes_malformed_json() {
        let workflow = uppercase_workflow();
        let err = workflow.translate_bytes("broken.json", b"{not valid", "es").await.unwrap_err();
        assert!(matches!(err, TradusError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_translate_bytes_empty_language() {
        let workflow = uppercase_workflow();
        let err = workflow.translate_bytes("a.srt", b"Hi", "").await.unwrap_err();
        assert!(matches!(err, TradusError::Config(_)));
    }

    #[tokio::test]
    async fn test_process_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.srt");
        std::fs::write(&input, "1\n00:00:01,000 --> 00:00:02,000\nGood night\n").unwrap();

        let workflow = uppercase_workflow();
        let (output, file) = workflow.process_file(&input, "fr", None::<&Path>).await.unwrap();

        assert_eq!(output, dir.path().join("talk_translated.srt"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), file.content);
        assert!(file.content.contains("GOOD NIGHT"));
    }

    #[tokio::test]
    async fn test_process_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let workflow = uppercase_workflow();
        let err = workflow
            .process_file(dir.path().join("nope.srt"), "fr", None::<&Path>)
            .await
            .unwrap_err();
        assert!(matches!(err, TradusError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_process_directory() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("a.srt"), "Hi\n").unwrap();
        std::fs::create_dir(input.path().join("nested")).unwrap();
        std::fs::write(input.path().join("nested").join("b.json"), r#"["x"]"#).unwrap();
        std::fs::write(input.path().join("broken.json"), "{").unwrap();
        std::fs::write(input.path().join("old_translated.srt"), "Hi\n").unwrap();
        std::fs::write(input.path().join("video.mp4"), "").unwrap();

        let workflow = uppercase_workflow();
        let report = workflow
            .process_directory(input.path(), "de", Some(output.path()))
            .await
            .unwrap();

        assert_eq!(report, BatchReport { processed: 2, failed: 1, fell_back_units: 0 });
        assert_eq!(std::fs::read_to_string(output.path().join("a_translated.srt")).unwrap(), "HI\n");
        assert_eq!(
            std::fs::read_to_string(output.path().join("nested").join("b_translated.json")).unwrap(),
            "[\n    \"X\"\n]"
        );
    }

    #[tokio::test]
    async fn test_process_directory_keeps_same_named_files_apart() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for (season, line) in [("s1", "first"), ("s2", "second")] {
            std::fs::create_dir(input.path().join(season)).unwrap();
            std::fs::write(input.path().join(season).join("ep.srt"), format!("{}\n", line)).unwrap();
        }

        let workflow = uppercase_workflow();
        let report = workflow
            .process_directory(input.path(), "es", Some(output.path()))
            .await
            .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(
            std::fs::read_to_string(output.path().join("s1").join("ep_translated.srt")).unwrap(),
            "FIRST\n"
        );
        assert_eq!(
            std::fs::read_to_string(output.path().join("s2").join("ep_translated.srt")).unwrap(),
            "SECOND\n"
        );
        assert!(!output.path().join("ep_translated.srt").exists());
    }

    #[test]
    fn test_mirrored_output_dir() {
        let root = Path::new("/out");
        assert_eq!(
            mirrored_output_dir(Path::new("/in"), Path::new("/in/s1/ep.srt"), root),
            PathBuf::from("/out/s1")
        );
        assert_eq!(
            mirrored_output_dir(Path::new("/in"), Path::new("/in/ep.srt"), root),
            PathBuf::from("/out")
        );
    }

    #[tokio::test]
    async fn test_check_backend() {
        let workflow = uppercase_workflow();
        assert!(workflow.check_backend("it").await.is_ok());
    }
}
