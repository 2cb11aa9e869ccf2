use itertools::Itertools;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};

use crate::config::AppError;
use crate::mirrors::MirrorData;

/// One pacman mirrorlist line per record, in the order given.
pub fn render_mirrorlist(mirrors: &[MirrorData]) -> String {
    mirrors
        .iter()
        .map(|mirror| format!("Server = {}$repo/os/$arch", mirror.url))
        .join("\n")
}

/// Writes the mirrorlist as a new file. An existing file at the path
/// is never overwritten or appended to.
pub fn write_mirrorlist(path: &str, mirrorlist: &str) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => AppError::FileExists(path.to_string()),
            _ => AppError::Io(err),
        })?;
    file.write_all(mirrorlist.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render_mirrorlist, write_mirrorlist};
    use crate::config::AppError;
    use crate::mirrors::MirrorData;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn mirror(url: &str) -> MirrorData {
        MirrorData {
            url: url.to_string(),
            protocol: "https".to_string(),
            country: "France".to_string(),
            country_code: "FR".to_string(),
            ipv4: true,
            ipv6: true,
            active: true,
            last_sync: Some("2024-05-01T10:00:00Z".to_string()),
            completion_pct: Some(1.0),
            delay: Some(3600),
            duration_avg: Some(0.5),
            duration_stddev: Some(0.1),
            score: Some(2.0),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("archmirrors-{}-{}", std::process::id(), name))
    }

    #[test]
    fn renders_one_server_line_per_mirror() {
        let mirrors = vec![
            mirror("https://mirror.example/archlinux/"),
            mirror("http://other.example/arch/"),
        ];
        assert_eq!(
            render_mirrorlist(&mirrors),
            "Server = https://mirror.example/archlinux/$repo/os/$arch\n\
             Server = http://other.example/arch/$repo/os/$arch"
        );
    }

    #[test]
    fn renders_nothing_for_no_mirrors() {
        assert_eq!(render_mirrorlist(&[]), "");
    }

    #[test]
    fn never_overwrites_an_existing_file() {
        let path = temp_path("no-overwrite");
        let path_str = path.to_str().unwrap();

        write_mirrorlist(path_str, "original").unwrap();
        let second = write_mirrorlist(path_str, "replacement");

        assert!(matches!(second, Err(AppError::FileExists(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");

        fs::remove_file(&path).unwrap();
    }
}
