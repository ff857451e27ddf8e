//! Working-directory context.
//!
//! Holds the current working directory and the `$PATH` search entries used
//! for command resolution. The REPL prompt contracts the home directory to
//! `~` through here.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

pub struct DirCtx {
    pub working_dir: PathBuf,
    pub search_path: Vec<PathBuf>,
}

impl DirCtx {
    /// Capture the process environment: current directory and `$PATH`.
    pub fn from_env() -> Self {
        let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let search_path = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();

        DirCtx {
            working_dir,
            search_path,
        }
    }

    /// Change the process working directory and remember where we ended
    /// up (the target may have been relative or a symlink).
    pub fn change_wd(&mut self, target: &str) -> io::Result<()> {
        env::set_current_dir(target)?;
        self.working_dir = env::current_dir()?;
        Ok(())
    }

    /// The working directory with the home prefix contracted to `~`, for
    /// the prompt.
    pub fn prompt_path(&self, home: Option<&Path>) -> String {
        match home {
            Some(home) => contract_home(&self.working_dir, home),
            None => self.working_dir.display().to_string(),
        }
    }
}

pub fn contract_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_itself_contracts_to_tilde() {
        assert_eq!(
            contract_home(Path::new("/home/gosh"), Path::new("/home/gosh")),
            "~"
        );
    }

    #[test]
    fn paths_under_home_get_the_tilde_prefix() {
        assert_eq!(
            contract_home(Path::new("/home/gosh/src/app"), Path::new("/home/gosh")),
            "~/src/app"
        );
    }

    #[test]
    fn paths_outside_home_stay_absolute() {
        assert_eq!(
            contract_home(Path::new("/etc"), Path::new("/home/gosh")),
            "/etc"
        );
    }

    #[test]
    fn prompt_path_without_home_is_the_working_dir() {
        let ctx = DirCtx {
            working_dir: PathBuf::from("/srv/data"),
            search_path: Vec::new(),
        };
        assert_eq!(ctx.prompt_path(None), "/srv/data");
    }
}
