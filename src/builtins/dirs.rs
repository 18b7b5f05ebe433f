use std::env;
use std::path::PathBuf;

use crate::builtins::{self, prelude::*};

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = builtins::CD_NAME;

    const HELP: &'static str = "\
cd: cd [dir]
    Change the current directory to DIR. The variable $HOME is the default dir.";

    fn run(_shell: &mut Shell, args: &[String], _stdout: &mut dyn Write) -> Result<()> {
        let dir = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or_else(|| Error::builtin_command("cd: HOME not set", 1))?,
        };

        env::set_current_dir(&dir)
            .map_err(|e| Error::builtin_command(format!("cd: {}: {}", dir.display(), e), 1))
    }
}

pub struct Pwd;

impl BuiltinCommand for Pwd {
    const NAME: &'static str = builtins::PWD_NAME;

    const HELP: &'static str = "\
pwd: pwd
    Print the name of the current working directory.";

    fn run(_shell: &mut Shell, _args: &[String], stdout: &mut dyn Write) -> Result<()> {
        let cwd = env::current_dir().map_err(|e| {
            Error::builtin_command(
                format!("pwd: error retrieving current directory: {}", e),
                1,
            )
        })?;
        writeln!(stdout, "{}", cwd.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;
    use std::path::Path;

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::shell::ShellConfig;

    /// Restores the working directory and `HOME` when dropped.
    struct SavedEnv {
        cwd: PathBuf,
        home: Option<OsString>,
    }

    impl SavedEnv {
        fn save() -> SavedEnv {
            SavedEnv {
                cwd: env::current_dir().unwrap(),
                home: env::var_os("HOME"),
            }
        }
    }

    impl Drop for SavedEnv {
        fn drop(&mut self) {
            env::set_current_dir(&self.cwd).unwrap();
            match self.home {
                Some(ref home) => env::set_var("HOME", home),
                None => env::remove_var("HOME"),
            }
        }
    }

    fn cd(args: &[&str]) -> Result<()> {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Cd::run(&mut shell, &args, &mut Vec::new())
    }

    fn canonical_cwd() -> PathBuf {
        env::current_dir().unwrap().canonicalize().unwrap()
    }

    fn canonical<P: AsRef<Path>>(path: P) -> PathBuf {
        path.as_ref().canonicalize().unwrap()
    }

    fn error_code(result: Result<()>) -> i32 {
        match *result.unwrap_err().kind() {
            ErrorKind::BuiltinCommand(_, code) => code,
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    #[serial]
    fn cd_to_argument() {
        let _saved = SavedEnv::save();
        let dir = TempDir::new("minishell-cd").unwrap();

        cd(&[dir.path().to_str().unwrap()]).unwrap();
        assert_eq!(canonical_cwd(), canonical(dir.path()));
    }

    #[test]
    #[serial]
    fn cd_without_argument_goes_home() {
        let _saved = SavedEnv::save();
        let home = TempDir::new("minishell-home").unwrap();
        env::set_var("HOME", home.path());

        cd(&[]).unwrap();
        assert_eq!(canonical_cwd(), canonical(home.path()));
    }

    #[test]
    #[serial]
    fn cd_without_home_fails() {
        let _saved = SavedEnv::save();
        env::remove_var("HOME");
        let before = env::current_dir().unwrap();

        assert_eq!(error_code(cd(&[])), 1);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn cd_to_missing_directory_fails_and_keeps_cwd() {
        let _saved = SavedEnv::save();
        let dir = TempDir::new("minishell-cd").unwrap();
        let missing = dir.path().join("does-not-exist");
        let before = env::current_dir().unwrap();

        assert_eq!(error_code(cd(&[missing.to_str().unwrap()])), 1);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn cd_to_file_fails() {
        let _saved = SavedEnv::save();
        let dir = TempDir::new("minishell-cd").unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "contents").unwrap();

        assert_eq!(error_code(cd(&[file.to_str().unwrap()])), 1);
    }

    #[test]
    #[serial]
    fn pwd_prints_current_directory() {
        let _saved = SavedEnv::save();
        let dir = TempDir::new("minishell-pwd").unwrap();
        env::set_current_dir(dir.path()).unwrap();

        let mut shell = Shell::new(ShellConfig::noninteractive());
        let mut stdout = Vec::new();
        Pwd::run(&mut shell, &[], &mut stdout).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            format!("{}\n", env::current_dir().unwrap().display())
        );
    }

    #[test]
    #[serial]
    fn pwd_in_deleted_directory_fails() {
        let _saved = SavedEnv::save();
        let dir = TempDir::new("minishell-pwd").unwrap();
        let doomed = dir.path().join("doomed");
        fs::create_dir(&doomed).unwrap();
        env::set_current_dir(&doomed).unwrap();
        fs::remove_dir(&doomed).unwrap();

        let mut shell = Shell::new(ShellConfig::noninteractive());
        let mut stdout = Vec::new();
        assert_eq!(error_code(Pwd::run(&mut shell, &[], &mut stdout)), 1);
        assert!(stdout.is_empty());
    }
}
