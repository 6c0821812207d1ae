//! Build script for Folio
//!
//! On Windows the application icon is embedded into the executable when the
//! resource files are present.

fn main() {
    #[cfg(target_os = "windows")]
    {
        const RC_FILE: &str = "assets/windows/folio.rc";
        const ICO_FILE: &str = "assets/windows/folio.ico";

        let present = [RC_FILE, ICO_FILE]
            .iter()
            .all(|path| std::path::Path::new(path).exists());
        if present {
            embed_resource::compile(RC_FILE, embed_resource::NONE);
            println!("cargo:rerun-if-changed={}", RC_FILE);
            println!("cargo:rerun-if-changed={}", ICO_FILE);
        } else {
            println!("cargo:warning=No Windows icon resources under assets/windows; building without one.");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
