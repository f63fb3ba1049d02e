use bitflags::bitflags;

bitflags! {
    /// Permission bits as reported in the low 9 bits of `st_mode`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileMode: u32 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC  = 0o100;
        const GROUP_READ  = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC  = 0o010;
        const OTHER_READ  = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC  = 0o001;
    }
}

const RENDER_ORDER: [(FileMode, char); 9] = [
    (FileMode::OWNER_READ, 'r'),
    (FileMode::OWNER_WRITE, 'w'),
    (FileMode::OWNER_EXEC, 'x'),
    (FileMode::GROUP_READ, 'r'),
    (FileMode::GROUP_WRITE, 'w'),
    (FileMode::GROUP_EXEC, 'x'),
    (FileMode::OTHER_READ, 'r'),
    (FileMode::OTHER_WRITE, 'w'),
    (FileMode::OTHER_EXEC, 'x'),
];

impl FileMode {
    /// Build from a raw `st_mode`, dropping file type and special bits.
    pub fn from_raw(mode: u32) -> Self {
        FileMode::from_bits_truncate(mode)
    }

    /// `ls -l` style rendering without the type column, e.g. `rwxr-xr-x`.
    pub fn render(self) -> String {
        RENDER_ORDER
            .iter()
            .map(|&(bit, c)| if self.contains(bit) { c } else { '-' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FileMode;

    #[test]
    fn render_matches_ls_style() {
        let cases: &[(u32, &str)] = &[
            (0o755, "rwxr-xr-x"),
            (0o644, "rw-r--r--"),
            (0o000, "---------"),
            (0o777, "rwxrwxrwx"),
            // file type and setuid bits are ignored
            (0o104_755, "rwxr-xr-x"),
        ];

        for (raw, expected) in cases {
            assert_eq!(FileMode::from_raw(*raw).render(), *expected, "mode {raw:o}");
        }
    }
}
