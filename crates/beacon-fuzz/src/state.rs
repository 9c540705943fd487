use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::debug;

use crate::{config::MAX_STATES, Error};

/// Identifier of a state snapshot, taken from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u16);

impl StateId {
    /// Only the file name has to be UTF-8; parent directories may hold any
    /// bytes the platform allows.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| u16::from_str(name).ok())
            .map(StateId)
            .ok_or_else(|| Error::InvalidStateName {
                path: path.to_owned(),
            })
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for StateId {
    fn from(value: u16) -> Self {
        StateId(value)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw contents of one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    pub id: StateId,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl StateFile {
    pub fn read(path: &Path) -> Result<Self, Error> {
        let id = StateId::from_path(path)?;
        let contents = fs::read(path).map_err(|source| Error::ReadState {
            path: path.to_owned(),
            source,
        })?;
        debug!(
            "read state {} from {} ({} bytes)",
            id,
            path.display(),
            contents.len()
        );

        Ok(Self {
            id,
            path: path.to_owned(),
            contents,
        })
    }
}

/// The snapshots to embed, keyed and ordered by identifier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StateSet {
    states: BTreeMap<StateId, Vec<u8>>,
}

impl StateSet {
    /// Reads the first [`MAX_STATES`] paths in order. Any failure aborts the
    /// whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, Error> {
        if paths.len() > MAX_STATES {
            debug!(
                "ignoring {} state paths beyond the first {}",
                paths.len() - MAX_STATES,
                MAX_STATES
            );
        }

        let mut set = Self::default();
        for path in paths.iter().take(MAX_STATES) {
            set.insert(StateFile::read(path.as_ref())?);
        }
        Ok(set)
    }

    /// Later files replace earlier ones with the same identifier.
    pub fn insert(&mut self, state: StateFile) {
        if self.states.insert(state.id, state.contents).is_some() {
            debug!(
                "state {} from {} replaces an earlier file",
                state.id,
                state.path.display()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, id: StateId) -> Option<&[u8]> {
        self.states.get(&id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &[u8])> {
        self.states.iter().map(|(id, contents)| (*id, contents.as_slice()))
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use camino::{Utf8Path, Utf8PathBuf};
    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    fn write_state(dir: &Utf8Path, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn tempdir() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    #[test_case("state/0", Some(0) ; "zero")]
    #[test_case("state/1", Some(1) ; "one")]
    #[test_case("/abs/state/65535", Some(65535) ; "max")]
    #[test_case("7", Some(7) ; "bare name")]
    #[test_case("state/+5", Some(5) ; "leading plus")]
    #[test_case("state/007", Some(7) ; "leading zeros")]
    #[test_case("state/65536", None ; "out of range")]
    #[test_case("state/-1", None ; "negative")]
    #[test_case("state/abc", None ; "non numeric")]
    #[test_case("state/1.ssz", None ; "extension")]
    #[test_case("state/..", None ; "no file name")]
    fn test_state_id_from_path(path: &str, expected: Option<u16>) {
        let actual = StateId::from_path(Path::new(path)).ok().map(StateId::get);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_invalid_name_reports_path() {
        let err = StateId::from_path(Path::new("state/abc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "state/abc does not end in an integer for the filename."
        );
    }

    #[test]
    fn test_load_states() {
        let (_tmp, dir) = tempdir();
        let zero = write_state(&dir, "0", &[0x01, 0x02]);
        let one = write_state(&dir, "1", &[0xff]);

        let set = StateSet::load(&[one, zero]).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0.into()), Some(&[0x01, 0x02][..]));
        assert_eq!(set.get(1.into()), Some(&[0xff][..]));
        let ids: Vec<_> = set.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_load_truncates_to_max_states() {
        let (_tmp, dir) = tempdir();
        let paths: Vec<_> = (0..20u8)
            .map(|i| write_state(&dir, &i.to_string(), &[i]))
            .collect();

        let set = StateSet::load(&paths).unwrap();

        assert_eq!(set.len(), MAX_STATES);
        assert!(set.get(14.into()).is_some());
        assert!(set.get(15.into()).is_none());
    }

    #[test]
    fn test_truncation_ignores_bad_paths_past_limit() {
        let (_tmp, dir) = tempdir();
        let mut paths: Vec<_> = (0..15u8)
            .map(|i| write_state(&dir, &i.to_string(), &[i]))
            .collect();
        paths.push(dir.join("not-a-number"));
        paths.push(dir.join("99"));

        let set = StateSet::load(&paths).unwrap();
        assert_eq!(set.len(), MAX_STATES);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let (_tmp, dir) = tempdir();
        fs::create_dir(dir.join("a")).unwrap();
        fs::create_dir(dir.join("b")).unwrap();
        let first = write_state(&dir, "a/3", b"first");
        let second = write_state(&dir, "b/3", b"second");

        let set = StateSet::load(&[first, second]).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(3.into()), Some(&b"second"[..]));
    }

    #[test]
    fn test_missing_file_fails() {
        let (_tmp, dir) = tempdir();
        let zero = write_state(&dir, "0", &[0x00]);
        let missing = dir.join("1");

        let err = StateSet::load(&[zero, missing.clone()]).unwrap_err();
        assert!(matches!(err, Error::ReadState { path, .. } if path == missing.as_std_path()));
    }

    #[test]
    fn test_bad_name_fails_before_read() {
        let (_tmp, dir) = tempdir();
        // never created, so a read attempt would surface as ReadState
        let bad = dir.join("abc");

        let err = StateSet::load(&[bad]).unwrap_err();
        assert!(matches!(err, Error::InvalidStateName { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_parent_dir() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(OsStr::from_bytes(b"caf\xe9"));
        if fs::create_dir(&dir).is_err() {
            // some file systems refuse names that are not valid UTF-8
            return;
        }
        let path = dir.join("0");
        fs::write(&path, [0x01u8, 0x02]).unwrap();

        let set = StateSet::load(&[path]).unwrap();
        assert_eq!(set.get(0.into()), Some(&[0x01, 0x02][..]));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let path = Path::new("state").join(OsStr::from_bytes(b"1\xff"));
        let err = StateId::from_path(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidStateName { .. }));
    }

    #[test]
    fn test_empty_paths() {
        let set = StateSet::load::<PathBuf>(&[]).unwrap();
        assert!(set.is_empty());
    }
}
