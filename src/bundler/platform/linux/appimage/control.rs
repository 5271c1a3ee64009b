//! AppDir control files: the `AppRun` launcher and the desktop entry.

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::AppMetadata,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// File name the icon is copied to inside the AppDir.
pub const ICON_FILE_NAME: &str = "applicationIcon.png";

/// Mode given to both control files.
const CONTROL_FILE_MODE: u32 = 0o777;

/// Renders the `AppRun` launcher.
///
/// The script resolves its own location through symlinks, so the mounted
/// image can live anywhere, then execs `usr/bin/<executable_name>` with no
/// arguments.
pub fn apprun_script(executable_name: &str) -> String {
    format!(
        "#!/bin/sh\n\
         HERE=\"$(dirname \"$(readlink -f \"${{0}}\")\")\"\n\
         EXEC=\"${{HERE}}/usr/bin/{}\"\n\
         exec \"${{EXEC}}\"",
        escape_double_quoted(executable_name)
    )
}

/// Renders the `[Desktop Entry]` block.
///
/// Optional keys are only written when the metadata carries them; their
/// line breaks are escaped so a value always stays on its own line. The
/// trailing `Path=` line is not newline-terminated; existing AppImages built
/// by this tool look exactly like that.
pub fn desktop_entry(metadata: &AppMetadata) -> String {
    let name = &metadata.program_name;
    let mut entry = String::from("[Desktop Entry]\nType=Application\n");

    entry.push_str(&format!("Name={name}\n"));
    entry.push_str(&format!("X-AppImage-Name={name}\n"));
    if let Some(version) = &metadata.version {
        entry.push_str(&format!("X-AppImage-Version={}\n", entry_value(version)));
    }
    entry.push_str("Exec=AppRun\n");
    if let Some(generic_name) = &metadata.generic_name {
        entry.push_str(&format!("GenericName={}\n", entry_value(generic_name)));
    }
    if let Some(description) = &metadata.description {
        entry.push_str(&format!("Comment={}\n", entry_value(description)));
    }

    entry.push_str("Categories=");
    for category in &metadata.categories {
        entry.push_str(category.as_str());
        entry.push(';');
    }
    entry.push('\n');

    let icon_name = ICON_FILE_NAME.trim_end_matches(".png");
    entry.push_str(&format!("Icon={icon_name}\n"));

    if let Some(working_dir) = &metadata.working_dir {
        entry.push_str(&format!("Path={}", entry_value(working_dir)));
    }

    entry
}

/// Paths of the files written by [`write_control_files`].
#[derive(Debug)]
pub struct ControlFiles {
    pub apprun: PathBuf,
    pub desktop: PathBuf,
}

/// Writes `AppRun` and `<program_name>.desktop` into `app_dir` and marks
/// both 0777.
pub async fn write_control_files(
    app_dir: &Path,
    metadata: &AppMetadata,
    executable_name: &str,
) -> Result<ControlFiles> {
    let apprun = app_dir.join("AppRun");
    let desktop = app_dir.join(format!("{}.desktop", metadata.program_name));

    tokio::fs::write(&apprun, apprun_script(executable_name))
        .await
        .fs_context("writing AppRun", &apprun)?;
    tokio::fs::write(&desktop, desktop_entry(metadata))
        .await
        .fs_context("writing desktop file", &desktop)?;

    fs::set_mode(&apprun, CONTROL_FILE_MODE).await?;
    fs::set_mode(&desktop, CONTROL_FILE_MODE).await?;

    log::debug!("Wrote {} and {}", apprun.display(), desktop.display());
    Ok(ControlFiles { apprun, desktop })
}

/// Escapes `\n`, `\r` and `\t` the way desktop entry string values spell
/// them.
fn entry_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes `$`, `` ` ``, `"` and `\` for use inside a double-quoted shell word.
fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '$' | '`' | '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Category;

    fn demo(categories: Vec<Category>) -> AppMetadata {
        AppMetadata {
            program_name: "Demo".into(),
            icon: "icon.png".into(),
            categories,
            ..Default::default()
        }
    }

    #[test]
    fn apprun_execs_binary_relative_to_itself() {
        let script = apprun_script("demo-linux_x64");
        assert_eq!(
            script,
            "#!/bin/sh\n\
             HERE=\"$(dirname \"$(readlink -f \"${0}\")\")\"\n\
             EXEC=\"${HERE}/usr/bin/demo-linux_x64\"\n\
             exec \"${EXEC}\""
        );
    }

    #[test]
    fn apprun_escapes_shell_metacharacters() {
        let script = apprun_script("we\"ird$name");
        assert!(script.contains("usr/bin/we\\\"ird\\$name\""));
    }

    #[test]
    fn minimal_entry() {
        let entry = desktop_entry(&demo(vec![Category::Utility, Category::Game]));
        assert_eq!(
            entry,
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Demo\n\
             X-AppImage-Name=Demo\n\
             Exec=AppRun\n\
             Categories=Utility;Game;\n\
             Icon=applicationIcon\n"
        );
        assert_eq!(
            entry.lines().filter(|l| l.starts_with("Categories=")).count(),
            1
        );
        assert!(!entry.contains("GenericName="));
        assert!(!entry.contains("Comment="));
        assert!(!entry.contains("Path="));
    }

    #[test]
    fn full_entry_keeps_key_order_and_unterminated_path() {
        let metadata = AppMetadata {
            generic_name: Some("Editor".into()),
            description: Some("Edits things".into()),
            version: Some("0.4.6-beta".into()),
            working_dir: Some("/opt/demo".into()),
            ..demo(vec![Category::Development])
        };
        assert_eq!(
            desktop_entry(&metadata),
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Demo\n\
             X-AppImage-Name=Demo\n\
             X-AppImage-Version=0.4.6-beta\n\
             Exec=AppRun\n\
             GenericName=Editor\n\
             Comment=Edits things\n\
             Categories=Development;\n\
             Icon=applicationIcon\n\
             Path=/opt/demo"
        );
    }

    #[test]
    fn line_breaks_in_values_cannot_add_keys() {
        let metadata = AppMetadata {
            description: Some("x\nExec=/bin/evil".into()),
            generic_name: Some("a\r\nIcon=other".into()),
            working_dir: Some("/opt\nType=Link".into()),
            ..demo(vec![Category::Utility])
        };
        let entry = desktop_entry(&metadata);

        assert!(entry.contains("Comment=x\\nExec=/bin/evil\n"));
        assert!(entry.contains("GenericName=a\\r\\nIcon=other\n"));
        assert!(entry.ends_with("Path=/opt\\nType=Link"));
        assert_eq!(entry.lines().filter(|l| l.starts_with("Exec=")).count(), 1);
        assert_eq!(entry.lines().filter(|l| l.starts_with("Icon=")).count(), 1);
        assert_eq!(entry.lines().filter(|l| l.starts_with("Type=")).count(), 1);
    }

    #[test]
    fn duplicate_categories_are_kept() {
        let entry = desktop_entry(&demo(vec![Category::Audio, Category::Audio]));
        assert!(entry.contains("Categories=Audio;Audio;\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn control_files_are_written_world_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let files = write_control_files(dir.path(), &demo(vec![Category::Utility]), "demo")
            .await
            .unwrap();

        assert!(files.desktop.ends_with("Demo.desktop"));
        for path in [&files.apprun, &files.desktop] {
            let mode = std::fs::metadata(path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o777, "{}", path.display());
        }
        let script = std::fs::read_to_string(&files.apprun).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
    }
}
