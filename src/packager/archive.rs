//! Archive builder - compresses a build directory into a single artifact.
//!
//! Supports plain tar, gzipped tar (single pass, tar written straight through
//! the gzip encoder) and zip. The directory contents are placed at the
//! archive root: the input directory itself never appears as a path prefix
//! inside the archive.
//!
//! Compression is blocking work, so the whole pipeline runs on the blocking
//! thread pool. The returned future resolves only once the output stream has
//! been finished and flushed. On failure a partial output file may be left
//! behind; no cleanup is attempted.

use crate::packager::error::{Error, Result};
use anyhow::Context as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format for [`build_archive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Uncompressed tar archive.
    Tar,
    /// Tar compressed with gzip in a single pass.
    TarGz,
    /// Zip archive with deflate compression.
    Zip,
}

impl ArchiveFormat {
    /// Returns the file extension appended to the output base path.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Compresses `input_dir` into `<output_base>.<extension>`.
///
/// Returns the path of the created archive. Concurrent invocations with
/// distinct output paths are safe; invocations racing on one output path are
/// a caller error with undefined result.
///
/// # Errors
///
/// [`Error::Archive`] wrapping the underlying I/O or compression failure.
pub async fn build_archive(
    format: ArchiveFormat,
    input_dir: &Path,
    output_base: &Path,
) -> Result<PathBuf> {
    let output_path = PathBuf::from(format!(
        "{}.{}",
        output_base.display(),
        format.extension()
    ));

    log::info!(
        "Packaging {} into {} archive at {}",
        input_dir.display(),
        format,
        output_path.display()
    );

    let input = input_dir.to_path_buf();
    let output = output_path.clone();

    // Offload the blocking compression pipeline to the dedicated thread pool
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        match format {
            ArchiveFormat::Tar => write_tar(&input, &output, false),
            ArchiveFormat::TarGz => write_tar(&input, &output, true),
            ArchiveFormat::Zip => write_zip(&input, &output),
        }
    })
    .await
    .map_err(|e| Error::GenericError(format!("archive task panicked: {e}")))?
    .map_err(|source| Error::Archive {
        format: format.extension(),
        path: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}

/// Writes a tar archive of `input` to `output`, optionally gzipped.
///
/// The gzipped variant negotiates "tar" internally and streams through the
/// gzip encoder rather than compressing a finished tarball in a second step.
fn write_tar(input: &Path, output: &Path, gzip: bool) -> anyhow::Result<()> {
    let file = File::create(output)
        .with_context(|| format!("creating archive file {}", output.display()))?;
    let writer = BufWriter::new(file);

    if gzip {
        let encoder = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        append_dir_contents(&mut builder, input)?;
        let encoder = builder
            .into_inner()
            .context("finalizing tar archive structure")?;
        let mut writer = encoder.finish().context("finishing gzip stream")?;
        writer.flush().context("flushing archive output")?;
    } else {
        let mut builder = tar::Builder::new(writer);
        append_dir_contents(&mut builder, input)?;
        let mut writer = builder
            .into_inner()
            .context("finalizing tar archive structure")?;
        writer.flush().context("flushing archive output")?;
    }

    Ok(())
}

/// Appends the contents of `input` at the root of the archive.
fn append_dir_contents<W: Write>(builder: &mut tar::Builder<W>, input: &Path) -> anyhow::Result<()> {
    builder
        .append_dir_all("", input)
        .with_context(|| format!("adding {} contents to tar archive", input.display()))
}

/// Writes a zip archive of `input` to `output` with deflate compression.
fn write_zip(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = File::create(output)
        .with_context(|| format!("creating archive file {}", output.display()))?;
    let mut writer = zip::ZipWriter::new(BufWriter::new(file));

    for entry in walkdir::WalkDir::new(input) {
        let entry = entry.with_context(|| format!("walking {}", input.display()))?;
        let rel_path = entry
            .path()
            .strip_prefix(input)
            .context("entry outside input directory")?;
        if rel_path.as_os_str().is_empty() {
            continue; // the input directory itself is not an archive entry
        }

        // Zip entry names always use forward slashes
        let name = rel_path.to_string_lossy().replace('\\', "/");
        let options = zip_entry_options(entry.path());

        if entry.file_type().is_dir() {
            writer
                .add_directory(name.as_str(), options)
                .with_context(|| format!("adding directory {name} to zip archive"))?;
        } else {
            writer
                .start_file(name.as_str(), options)
                .with_context(|| format!("adding file {name} to zip archive"))?;
            let mut src = File::open(entry.path())
                .with_context(|| format!("opening {}", entry.path().display()))?;
            io::copy(&mut src, &mut writer)
                .with_context(|| format!("compressing {name}"))?;
        }
    }

    let mut inner = writer.finish().context("finalizing zip archive")?;
    inner.flush().context("flushing archive output")?;
    Ok(())
}

/// Zip entry options, preserving unix permission bits where available.
fn zip_entry_options(path: &Path) -> zip::write::SimpleFileOptions {
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = path.metadata() {
            return options.unix_permissions(metadata.permissions().mode());
        }
    }
    #[cfg(not(unix))]
    let _ = path;

    options
}
