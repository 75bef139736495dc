//! Install workflow execution.
//!
//! The workflow walks [`InstallStage`]s strictly in order. Only two stages
//! can stop it early without an error: a missing prerequisite and a failed
//! scaffold. Install failures are fatal only in strict mode. Nothing is
//! rolled back, so a failure after scaffolding leaves the project on disk.
//!
//! The process working directory is never changed. Commands after the
//! scaffold run with the project directory as their `cwd`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::InstallerConfig;
use crate::error::{Result, SetupError};
use crate::shell::{CommandOptions, CommandRunner, OutputLine};
use crate::ui::UserInterface;

use super::stage::{InstallOutcome, InstallStage};

/// Prompt shown before exiting on the success path.
pub const EXIT_PROMPT: &str = "\nPress Enter to exit...";

/// Options for running the install workflow.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Directory the project is created in.
    pub parent_dir: PathBuf,
    /// Show commands instead of running them.
    pub dry_run: bool,
    /// Wait for acknowledgement after printing the instructions.
    pub pause: bool,
}

impl WorkflowOptions {
    /// Options for a real run in `parent_dir` that pauses at the end.
    pub fn new(parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            parent_dir: parent_dir.into(),
            dry_run: false,
            pause: true,
        }
    }
}

/// Runs the install stages for one configuration.
pub struct InstallWorkflow<'a> {
    config: &'a InstallerConfig,
    options: WorkflowOptions,
}

impl<'a> InstallWorkflow<'a> {
    /// Create a workflow.
    pub fn new(config: &'a InstallerConfig, options: WorkflowOptions) -> Self {
        Self { config, options }
    }

    /// Where the scaffolding tool is expected to create the project.
    pub fn project_dir(&self) -> PathBuf {
        self.options.parent_dir.join(&self.config.project_name)
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns `ProjectDirectoryMissing` if the scaffold exits 0 without
    /// creating the project directory, and `DependencyInstallFailed` for a
    /// failed install in strict mode.
    pub fn run(
        &self,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        ui.show_header(&format!("{} Installer", self.config.app_name));

        enter(InstallStage::CheckPrerequisite);
        if !self.check_prerequisite(runner, ui) {
            return Ok(InstallOutcome::PrerequisiteMissing);
        }

        enter(InstallStage::Scaffold);
        let scaffold = self.config.resolved_scaffold_command()?;
        ui.message(&format!(
            "\n1. Creating project '{}'...",
            self.config.project_name
        ));
        let code = self.run_command(runner, ui, &scaffold, &self.options.parent_dir)?;
        if code != 0 {
            ui.error(&format!(
                "Failed to create the project (exit code {}).",
                code
            ));
            return Ok(InstallOutcome::ScaffoldFailed { code });
        }

        enter(InstallStage::EnterProjectDirectory);
        let project_dir = self.enter_project_directory()?;

        enter(InstallStage::InstallBaseDependencies);
        ui.message(&self.install_banner());
        let install = self.config.resolved_install_command()?;
        let code = self.run_command(runner, ui, &install, &project_dir)?;
        self.check_install(ui, InstallStage::InstallBaseDependencies, &install, code)?;

        enter(InstallStage::InstallExtraDependencies);
        if self.config.extra_packages.is_empty() {
            debug!("No extra packages configured");
        } else {
            let extra = self.config.resolved_extra_install_command()?;
            let code = self.run_command(runner, ui, &extra, &project_dir)?;
            self.check_install(ui, InstallStage::InstallExtraDependencies, &extra, code)?;
        }

        enter(InstallStage::EmitInstructions);
        ui.info("The environment is ready.");
        for line in self.instructions() {
            ui.notice(&line);
        }

        if self.options.pause {
            ui.pause(EXIT_PROMPT)?;
        }

        Ok(InstallOutcome::Completed)
    }

    /// The follow-up steps the user has to do by hand.
    pub fn instructions(&self) -> Vec<String> {
        let entry = Path::new(&self.config.app_entry);
        let folder = match entry.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                format!("{}/{}", self.config.project_name, parent.display())
            }
            _ => self.config.project_name.clone(),
        };
        let file = entry
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.app_entry.clone());

        vec![
            format!(
                "IMPORTANT: Go to the folder '{}' and replace the contents of '{}' with the complete application code.",
                folder, file
            ),
            "Once that is done, run this inside the project folder:".to_string(),
            self.config.run_command.clone(),
        ]
    }

    fn check_prerequisite(&self, runner: &mut dyn CommandRunner, ui: &mut dyn UserInterface) -> bool {
        let prereq = &self.config.prerequisite;

        let mut spinner = ui.start_spinner(&format!("Checking for {}...", prereq.name));
        let status = runner.probe(&prereq.binary, &prereq.version_args);
        spinner.finish_and_clear();

        if !status.is_present() {
            ui.error(&format!(
                "{} is not installed. Please download it from {}",
                prereq.name, prereq.install_url
            ));
            return false;
        }

        match status.version() {
            Some(version) => ui.success(&format!("{} detected ({}).", prereq.name, version)),
            None => ui.success(&format!("{} detected.", prereq.name)),
        }
        true
    }

    fn enter_project_directory(&self) -> Result<PathBuf> {
        let dir = self.project_dir();
        if !self.options.dry_run && !dir.is_dir() {
            return Err(SetupError::ProjectDirectoryMissing { path: dir });
        }
        debug!("Running remaining commands in {}", dir.display());
        Ok(dir)
    }

    fn install_banner(&self) -> String {
        if self.config.extra_packages.is_empty() {
            "\n2. Installing dependencies...".to_string()
        } else {
            format!(
                "\n2. Installing dependencies ({})...",
                self.config.extra_packages.join(", ")
            )
        }
    }

    fn run_command(
        &self,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
        command: &str,
        cwd: &Path,
    ) -> Result<i32> {
        if self.options.dry_run || ui.output_mode().echoes_commands() {
            ui.show_command(command);
        }
        if self.options.dry_run {
            return Ok(0);
        }

        let options = CommandOptions {
            cwd: Some(cwd.to_path_buf()),
            ..Default::default()
        };
        let result = runner.run_streaming(command, &options, &mut |line: OutputLine| {
            ui.command_output(line.text().trim())
        })?;

        debug!(
            "'{}' exited with {:?} after {:?}",
            command, result.exit_code, result.duration
        );
        Ok(result.code())
    }

    fn check_install(
        &self,
        ui: &mut dyn UserInterface,
        stage: InstallStage,
        command: &str,
        code: i32,
    ) -> Result<()> {
        if code == 0 {
            return Ok(());
        }

        if self.config.strict {
            return Err(SetupError::DependencyInstallFailed {
                command: command.to_string(),
                code,
            });
        }

        debug!(stage = %stage, code, "Install failed, continuing (strict mode off)");
        ui.warning(&format!(
            "'{}' exited with code {}. Continuing anyway.",
            command, code
        ));
        Ok(())
    }
}

fn enter(stage: InstallStage) {
    debug!(stage = %stage, "Entering stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::PrerequisiteStatus;
    use crate::shell::{ScriptedCommand, ScriptedRunner};
    use crate::ui::{MockUI, OutputMode};
    use tempfile::TempDir;

    const SCAFFOLD: &str = "npm create vite@latest neuro-composer -- --template react";
    const INSTALL: &str = "npm install";
    const EXTRA: &str = "npm install tone lucide-react";

    fn options(temp: &TempDir) -> WorkflowOptions {
        WorkflowOptions::new(temp.path())
    }

    fn runner_with_scaffold(temp: &TempDir) -> ScriptedRunner {
        let mut runner = ScriptedRunner::new();
        runner.on_command(
            SCAFFOLD,
            ScriptedCommand::exit(0)
                .with_output(&["Scaffolding project in ./neuro-composer...", "Done."])
                .creating_dir(temp.path().join("neuro-composer")),
        );
        runner
    }

    #[test]
    fn absent_prerequisite_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = ScriptedRunner::new();
        runner.set_prerequisite(PrerequisiteStatus::Absent);
        let mut ui = MockUI::new();

        let outcome = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::PrerequisiteMissing);
        assert!(runner.commands().is_empty());
        assert_eq!(ui.errors().len(), 1);
        assert!(ui.has_error("not installed"));
        assert!(ui.has_error("https://nodejs.org/"));
        assert!(ui.messages().is_empty());
        assert!(ui.pauses().is_empty());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn scaffold_failure_halts_before_directory_stage() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = ScriptedRunner::new();
        runner.on_command(SCAFFOLD, ScriptedCommand::exit(1));
        let mut ui = MockUI::new();

        let outcome = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::ScaffoldFailed { code: 1 });
        assert_eq!(runner.commands(), vec![SCAFFOLD]);
        assert!(ui.has_error("Failed to create the project"));
        assert!(ui.pauses().is_empty());
    }

    #[test]
    fn full_run_installs_in_project_dir_and_prints_instructions() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        let mut ui = MockUI::new();

        let outcome = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Completed);
        assert_eq!(runner.commands(), vec![SCAFFOLD, INSTALL, EXTRA]);

        let project_dir = temp.path().join("neuro-composer");
        assert_eq!(runner.cwd_of(SCAFFOLD), Some(temp.path()));
        assert_eq!(runner.cwd_of(INSTALL), Some(project_dir.as_path()));
        assert_eq!(runner.cwd_of(EXTRA), Some(project_dir.as_path()));

        assert_eq!(
            ui.output_lines(),
            ["Scaffolding project in ./neuro-composer...", "Done."]
        );
        assert!(ui.has_notice("neuro-composer/src"));
        assert!(ui.has_notice("App.jsx"));
        assert_eq!(ui.notices().last().map(String::as_str), Some("npm run dev"));
        assert_eq!(ui.pauses(), [EXIT_PROMPT]);
    }

    #[test]
    fn step_banners_follow_original_wording() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        let mut ui = MockUI::new();

        InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(ui.headers(), ["NeuroComposer v12 Installer"]);
        assert!(ui.has_message("1. Creating project 'neuro-composer'..."));
        assert!(ui.has_message("2. Installing dependencies (tone, lucide-react)..."));
        assert!(ui.has_success("Node.js detected."));
    }

    #[test]
    fn detected_version_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        runner.set_prerequisite(PrerequisiteStatus::Present {
            version: Some("v20.11.1".to_string()),
        });
        let mut ui = MockUI::new();

        InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert!(ui.has_success("Node.js detected (v20.11.1)."));
    }

    #[test]
    fn missing_project_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let err = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap_err();

        assert!(matches!(err, SetupError::ProjectDirectoryMissing { .. }));
        assert_eq!(runner.commands(), vec![SCAFFOLD]);
        assert!(ui.pauses().is_empty());
    }

    #[test]
    fn permissive_mode_continues_after_install_failures() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        runner.on_command(INSTALL, ScriptedCommand::exit(1));
        runner.on_command(EXTRA, ScriptedCommand::exit(2));
        let mut ui = MockUI::new();

        let outcome = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Completed);
        assert_eq!(runner.commands(), vec![SCAFFOLD, INSTALL, EXTRA]);
        assert_eq!(ui.warnings().len(), 2);
        assert!(ui.has_warning("exited with code 2"));
        assert_eq!(ui.pauses().len(), 1);
    }

    #[test]
    fn strict_mode_stops_on_first_install_failure() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig {
            strict: true,
            ..Default::default()
        };
        let mut runner = runner_with_scaffold(&temp);
        runner.on_command(INSTALL, ScriptedCommand::exit(254));
        let mut ui = MockUI::new();

        let err = InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap_err();

        match err {
            SetupError::DependencyInstallFailed { command, code } => {
                assert_eq!(command, INSTALL);
                assert_eq!(code, 254);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.commands(), vec![SCAFFOLD, INSTALL]);
        // No rollback: the scaffolded project stays.
        assert!(temp.path().join("neuro-composer").is_dir());
    }

    #[test]
    fn dry_run_shows_commands_without_running_them() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();
        let options = WorkflowOptions {
            dry_run: true,
            ..options(&temp)
        };

        let outcome = InstallWorkflow::new(&config, options)
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Completed);
        assert!(runner.commands().is_empty());
        assert_eq!(runner.probes(), ["node".to_string()]);
        assert_eq!(ui.commands(), [SCAFFOLD, INSTALL, EXTRA]);
    }

    #[test]
    fn verbose_mode_echoes_commands() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(ui.commands(), [SCAFFOLD, INSTALL, EXTRA]);
    }

    #[test]
    fn no_pause_skips_the_prompt() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        let mut ui = MockUI::new();
        let options = WorkflowOptions {
            pause: false,
            ..options(&temp)
        };

        InstallWorkflow::new(&config, options)
            .run(&mut runner, &mut ui)
            .unwrap();

        assert!(ui.pauses().is_empty());
    }

    #[test]
    fn empty_extra_packages_skip_second_install() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig {
            extra_packages: Vec::new(),
            ..Default::default()
        };
        let mut runner = runner_with_scaffold(&temp);
        let mut ui = MockUI::new();

        InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert_eq!(runner.commands(), vec![SCAFFOLD, INSTALL]);
        assert!(ui.has_message("2. Installing dependencies..."));
    }

    #[test]
    fn output_lines_are_trimmed() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::default();
        let mut runner = runner_with_scaffold(&temp);
        runner.on_command(
            INSTALL,
            ScriptedCommand::exit(0).with_output(&["  added 42 packages  ", ""]),
        );
        let mut ui = MockUI::new();

        InstallWorkflow::new(&config, options(&temp))
            .run(&mut runner, &mut ui)
            .unwrap();

        assert!(ui.output_lines().contains(&"added 42 packages".to_string()));
        assert!(ui.output_lines().contains(&String::new()));
    }

    #[test]
    fn instructions_follow_app_entry() {
        let config = InstallerConfig {
            project_name: "synth".to_string(),
            app_entry: "App.tsx".to_string(),
            run_command: "npm start".to_string(),
            ..Default::default()
        };
        let workflow = InstallWorkflow::new(&config, WorkflowOptions::new("/tmp"));

        let lines = workflow.instructions();
        assert!(lines[0].contains("'synth'"));
        assert!(lines[0].contains("'App.tsx'"));
        assert_eq!(lines[2], "npm start");
        assert_eq!(workflow.project_dir(), PathBuf::from("/tmp/synth"));
    }
}
