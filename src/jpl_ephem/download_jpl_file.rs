//! Location, caching and download of JPL planetary kernels.
//!
//! An ephemeris source is described by a short string:
//!
//! * `"naif:DE421"`: a NAIF planetary kernel, looked up in the user cache
//!   directory (`<cache>/crescent_cache/jpl_ephem/de421.bsp`) and downloaded
//!   from the NAIF server when missing and the `jpl-download` feature is enabled;
//! * any other string: a path to a local `.bsp` file.
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

use super::naif::naif_version::NaifVersion;
use crate::crescent_errors::CrescentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemFileSource {
    Naif(NaifVersion),
    LocalPath(Utf8PathBuf),
}

impl TryFrom<&str> for EphemFileSource {
    type Error = CrescentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CrescentError::InvalidJPLEphemFileSource(
                "empty ephemeris source".to_string(),
            ));
        }
        match value.split_once(':') {
            Some(("naif", version)) => Ok(EphemFileSource::Naif(version.parse()?)),
            Some((scheme, _)) if scheme.len() > 1 && !scheme.contains(['/', '\\', '.']) => Err(
                CrescentError::InvalidJPLEphemFileSource(format!("unknown source '{value}'")),
            ),
            _ => Ok(EphemFileSource::LocalPath(Utf8PathBuf::from(value))),
        }
    }
}

impl fmt::Display for EphemFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemFileSource::Naif(version) => write!(f, "naif:{version}"),
            EphemFileSource::LocalPath(path) => write!(f, "{path}"),
        }
    }
}

impl EphemFileSource {
    /// Short label of the kernel, e.g. `DE421` or the local file stem.
    pub fn label(&self) -> String {
        match self {
            EphemFileSource::Naif(version) => version.to_string(),
            EphemFileSource::LocalPath(path) => path
                .file_stem()
                .map(str::to_uppercase)
                .unwrap_or_else(|| path.to_string()),
        }
    }

    /// Cache directory of the downloaded kernels.
    pub fn cache_dir() -> Result<Utf8PathBuf, CrescentError> {
        let base_dir = BaseDirs::new().ok_or_else(|| {
            CrescentError::UnableToCreateBaseDir("no home directory for the cache".to_string())
        })?;
        let cache_path = Utf8Path::from_path(base_dir.cache_dir()).ok_or_else(|| {
            CrescentError::Utf8PathError(format!("{}", base_dir.cache_dir().display()))
        })?;
        Ok(cache_path.join("crescent_cache").join("jpl_ephem"))
    }

    /// Resolve the source to an existing file, downloading it if needed and allowed.
    ///
    /// Return
    /// ------
    /// * The path to the kernel, or [`CrescentError::JPLFileNotFound`] when the file
    ///   is absent and cannot be downloaded.
    pub fn get_ephemeris_file(&self) -> Result<Utf8PathBuf, CrescentError> {
        match self {
            EphemFileSource::LocalPath(path) => {
                if path.exists() {
                    Ok(path.clone())
                } else {
                    Err(CrescentError::JPLFileNotFound(path.to_string()))
                }
            }
            EphemFileSource::Naif(version) => {
                let local_file = Self::cache_dir()?.join(version.get_filename());
                if local_file.exists() {
                    return Ok(local_file);
                }
                download_kernel(version, &local_file)?;
                Ok(local_file)
            }
        }
    }
}

#[cfg(feature = "jpl-download")]
fn download_kernel(version: &NaifVersion, local_file: &Utf8Path) -> Result<(), CrescentError> {
    if let Some(parent) = local_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let partial = local_file.with_extension("bsp.part");
    let url = version.url();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(download_big_file(&url, &partial))?;
    std::fs::rename(&partial, local_file)?;
    Ok(())
}

#[cfg(not(feature = "jpl-download"))]
fn download_kernel(version: &NaifVersion, local_file: &Utf8Path) -> Result<(), CrescentError> {
    Err(CrescentError::JPLFileNotFound(format!(
        "{local_file} (enable the `jpl-download` feature or fetch {} manually)",
        version.url()
    )))
}

/// Stream a large file to disk chunk by chunk.
#[cfg(feature = "jpl-download")]
async fn download_big_file(url: &str, path: &Utf8Path) -> Result<(), CrescentError> {
    use tokio::{fs::File, io::AsyncWriteExt};
    use tokio_stream::StreamExt;

    let mut file = File::create(path).await?;
    tracing::info!("Downloading {url}...");

    let mut stream = reqwest::get(url).await?.error_for_status()?.bytes_stream();
    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    tracing::info!("Downloaded {url}");
    Ok(())
}

#[cfg(test)]
mod jpl_reader_test {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            EphemFileSource::try_from("naif:DE421").unwrap(),
            EphemFileSource::Naif(NaifVersion::DE421)
        );
        assert_eq!(
            EphemFileSource::try_from("data/de421.bsp").unwrap(),
            EphemFileSource::LocalPath(Utf8PathBuf::from("data/de421.bsp"))
        );
        assert_eq!(
            EphemFileSource::try_from("naif:DE999"),
            Err(CrescentError::InvalidJPLEphemFileVersion("DE999".into()))
        );
        assert!(EphemFileSource::try_from("horizon:DE440").is_err());
        assert!(EphemFileSource::try_from("  ").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            EphemFileSource::try_from("naif:de421").unwrap().label(),
            "DE421"
        );
        assert_eq!(
            EphemFileSource::try_from("/tmp/de440s.bsp").unwrap().label(),
            "DE440S"
        );
        assert_eq!(
            EphemFileSource::try_from("naif:DE421").unwrap().to_string(),
            "naif:DE421"
        );
    }

    #[test]
    fn test_missing_local_file() {
        let source = EphemFileSource::try_from("/definitely/not/here.bsp").unwrap();
        assert_eq!(
            source.get_ephemeris_file(),
            Err(CrescentError::JPLFileNotFound(
                "/definitely/not/here.bsp".into()
            ))
        );
    }
}
