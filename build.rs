// Build script for embedding Windows resources (version info, optional icon)
// This only runs on Windows targets

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        embed_windows_resources();
    }
}

#[cfg(windows)]
fn embed_windows_resources() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let name = std::env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "crystaldice".to_string());
    let description =
        std::env::var("CARGO_PKG_DESCRIPTION").unwrap_or_else(|_| "Crystal Dice".to_string());

    // Parse version for Windows VERSIONINFO (major.minor.patch.0)
    let version_parts: Vec<&str> = version.split('.').collect();
    let major = version_parts.first().unwrap_or(&"0");
    let minor = version_parts.get(1).unwrap_or(&"0");
    let patch = version_parts.get(2).unwrap_or(&"0");

    let mut res = winresource::WindowsResource::new();

    let icon = std::path::Path::new("assets/icon.ico");
    if icon.exists() {
        res.set_icon("assets/icon.ico");
    }

    res.set("FileVersion", &format!("{}.{}.{}.0", major, minor, patch));
    res.set("ProductVersion", &version);
    res.set("ProductName", "Crystal Dice");
    res.set("FileDescription", &description);
    res.set("OriginalFilename", &format!("{}.exe", name));

    match res.compile() {
        Ok(_) => println!("cargo:warning=Compiled Windows resources"),
        Err(e) => println!("cargo:warning=Failed to compile Windows resources: {}", e),
    }
}

#[cfg(not(windows))]
fn embed_windows_resources() {}
