//! Parsing helpers for `/proc/self/mountinfo`.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    pub mount_point: PathBuf,
    pub fs_type: String,
    pub source: String,
}

pub fn parse_mountinfo(content: &str) -> Vec<MountInfo> {
    content
        .lines()
        .filter_map(|line| {
            // <id> <parent> <major:minor> <root> <mount point> <opts...> - <fstype> <source> <superopts>
            let (pre, post) = line.split_once(" - ")?;
            let mount_point = pre.split_whitespace().nth(4)?;
            let mut post_fields = post.split_whitespace();
            let fs_type = post_fields.next().unwrap_or_default();
            let source = post_fields.next().unwrap_or_default();
            Some(MountInfo {
                mount_point: PathBuf::from(unescape_mount_path(mount_point)),
                fs_type: fs_type.to_string(),
                source: unescape_mount_path(source),
            })
        })
        .collect()
}

/// Last entry mounted exactly at `path` (the one currently visible if mounts are stacked).
pub fn find_mount<'a>(path: &Path, entries: &'a [MountInfo]) -> Option<&'a MountInfo> {
    let target = normalize_path(path);
    entries
        .iter()
        .rev()
        .find(|entry| normalize_path(&entry.mount_point) == target)
}

pub fn unescape_mount_path(raw: &str) -> String {
    raw.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}

fn normalize_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.len() > 1 && s.ends_with('/') {
        s.trim_end_matches('/').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "36 28 0:31 / / rw,relatime - ext4 /dev/sda3 rw\n\
                          37 28 0:32 / /var/vcap/store rw,relatime shared:1 - ext4 /dev/sdc rw\n\
                          38 28 0:33 / /mnt/data\\040disk rw,relatime - xfs /dev/sdd rw\n";

    #[test]
    fn parse_extracts_mountpoint_type_and_source() {
        let entries = parse_mountinfo(SAMPLE);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].mount_point, PathBuf::from("/var/vcap/store"));
        assert_eq!(entries[1].fs_type, "ext4");
        assert_eq!(entries[1].source, "/dev/sdc");
    }

    #[test]
    fn parse_unescapes_paths() {
        let entries = parse_mountinfo(SAMPLE);
        assert_eq!(entries[2].mount_point, PathBuf::from("/mnt/data disk"));
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let entries = parse_mountinfo("garbage\n36 28 0:31 / / rw - ext4 /dev/sda3 rw\n");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn find_mount_ignores_trailing_slash() {
        let entries = parse_mountinfo(SAMPLE);
        let found = find_mount(Path::new("/var/vcap/store/"), &entries).unwrap();
        assert_eq!(found.source, "/dev/sdc");
        assert!(find_mount(Path::new("/var/vcap"), &entries).is_none());
    }

    #[test]
    fn find_mount_returns_topmost_of_stacked_mounts() {
        let stacked = "40 28 0:40 / /mnt rw - ext4 /dev/sdb rw\n\
                       41 40 0:41 / /mnt rw - ext4 /dev/sdc rw\n";
        let entries = parse_mountinfo(stacked);
        assert_eq!(find_mount(Path::new("/mnt"), &entries).unwrap().source, "/dev/sdc");
    }
}
