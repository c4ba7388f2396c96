use std::fs;
use std::io::Write;
use std::path::PathBuf;

use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{MarkhopError, Result};

pub const WORKFLOW_NAME: &str = "Markhop";
pub const WORKFLOW_BUNDLE_ID: &str = "com.markhop.bookmarks";
pub const WORKFLOW_EXTENSION: &str = "alfredworkflow";
pub const SEARCH_SCRIPT_NAME: &str = "bm_search.sh";
pub const BUNDLED_BINARY_NAME: &str = "markhop";
pub const DEFAULT_KEYWORD: &str = "bm";

#[derive(Debug, Clone)]
pub struct WorkflowPackageOptions {
    pub out_dir: PathBuf,
    /// Copied into the bundle when set; otherwise the script expects
    /// `markhop` on `PATH`.
    pub binary: Option<PathBuf>,
    pub keyword: String,
}

impl WorkflowPackageOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            binary: None,
            keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

/// Writes `<out_dir>/Markhop.alfredworkflow`: a script filter bound to the
/// keyword that feeds an open-URL action.
pub fn package_workflow(options: &WorkflowPackageOptions) -> Result<PathBuf> {
    let keyword = options.keyword.trim();
    if keyword.is_empty() || keyword.contains(char::is_whitespace) {
        return Err(MarkhopError::Validation(format!(
            "workflow keyword must be a single word, got '{}'",
            options.keyword
        )));
    }
    if let Some(binary) = &options.binary
        && !binary.is_file()
    {
        return Err(MarkhopError::NotFound(binary.display().to_string()));
    }

    fs::create_dir_all(&options.out_dir)?;
    let out_path = options
        .out_dir
        .join(format!("{WORKFLOW_NAME}.{WORKFLOW_EXTENSION}"));

    let file = fs::File::create(&out_path)?;
    let mut zip = ZipWriter::new(file);
    let data = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let executable = data.unix_permissions(0o755);

    zip.start_file("info.plist", data)?;
    zip.write_all(render_info_plist(keyword, &Uuid::new_v4(), &Uuid::new_v4()).as_bytes())?;

    zip.start_file(SEARCH_SCRIPT_NAME, executable)?;
    zip.write_all(render_search_script(options.binary.is_some()).as_bytes())?;

    if let Some(binary) = &options.binary {
        zip.start_file(BUNDLED_BINARY_NAME, executable)?;
        zip.write_all(&fs::read(binary)?)?;
    }

    zip.finish()?;
    Ok(out_path)
}

fn render_search_script(bundled: bool) -> String {
    let program = if bundled {
        format!("./{BUNDLED_BINARY_NAME}")
    } else {
        BUNDLED_BINARY_NAME.to_string()
    };
    format!("#!/bin/bash\n{program} search \"$1\"\n")
}

fn render_info_plist(keyword: &str, filter_uid: &Uuid, open_uid: &Uuid) -> String {
    let keyword = xml_escape(keyword);
    let filter_uid = filter_uid.to_string().to_uppercase();
    let open_uid = open_uid.to_string().to_uppercase();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>bundleid</key>
    <string>{WORKFLOW_BUNDLE_ID}</string>
    <key>category</key>
    <string>Productivity</string>
    <key>connections</key>
    <dict>
        <key>{filter_uid}</key>
        <array>
            <dict>
                <key>destinationuid</key>
                <string>{open_uid}</string>
                <key>modifiers</key>
                <integer>0</integer>
                <key>modifiersubtext</key>
                <string></string>
                <key>vitoclose</key>
                <false/>
            </dict>
        </array>
    </dict>
    <key>description</key>
    <string>Search Chrome bookmarks</string>
    <key>disabled</key>
    <false/>
    <key>name</key>
    <string>{WORKFLOW_NAME}</string>
    <key>objects</key>
    <array>
        <dict>
            <key>config</key>
            <dict>
                <key>alfredfiltersresults</key>
                <false/>
                <key>argumenttype</key>
                <integer>0</integer>
                <key>escaping</key>
                <integer>102</integer>
                <key>keyword</key>
                <string>{keyword}</string>
                <key>queuedelay</key>
                <integer>3</integer>
                <key>runningsubtext</key>
                <string>Searching bookmarks...</string>
                <key>script</key>
                <string>./{SEARCH_SCRIPT_NAME} "{{query}}"</string>
                <key>scriptargtype</key>
                <integer>0</integer>
                <key>subtext</key>
                <string>Search your Chrome bookmarks</string>
                <key>title</key>
                <string>Search Bookmarks</string>
                <key>type</key>
                <integer>0</integer>
                <key>withspace</key>
                <true/>
            </dict>
            <key>type</key>
            <string>alfred.workflow.input.scriptfilter</string>
            <key>uid</key>
            <string>{filter_uid}</string>
            <key>version</key>
            <integer>3</integer>
        </dict>
        <dict>
            <key>config</key>
            <dict>
                <key>browser</key>
                <string>com.google.Chrome</string>
                <key>spaces</key>
                <string></string>
                <key>url</key>
                <string>{{query}}</string>
                <key>utf8</key>
                <true/>
            </dict>
            <key>type</key>
            <string>alfred.workflow.action.openurl</string>
            <key>uid</key>
            <string>{open_uid}</string>
            <key>version</key>
            <integer>1</integer>
        </dict>
    </array>
    <key>readme</key>
    <string>Search your Chrome bookmarks</string>
    <key>uidata</key>
    <dict>
        <key>{filter_uid}</key>
        <dict>
            <key>xpos</key>
            <integer>100</integer>
            <key>ypos</key>
            <integer>100</integer>
        </dict>
        <key>{open_uid}</key>
        <dict>
            <key>xpos</key>
            <integer>300</integer>
            <key>ypos</key>
            <integer>100</integer>
        </dict>
    </dict>
    <key>version</key>
    <string>{version}</string>
</dict>
</plist>
"#,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
