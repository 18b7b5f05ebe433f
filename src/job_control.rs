use std::fmt;
use std::process::ExitStatus;

use log::{info, warn};
use nix::unistd::Pid;

use crate::core::command::Command;
use crate::execute_command::try_wait_for_process;

/// A process the shell launched in the background and has not yet reaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundJob {
    id: u32,
    pid: Pid,
    /// The command line that started the job.
    command: String,
}

impl BackgroundJob {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl fmt::Display for BackgroundJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.pid)
    }
}

/// Owns every background child until its exit status has been collected.
#[derive(Debug, Default)]
pub struct BackgroundJobs {
    jobs: Vec<BackgroundJob>,
    job_count: u32,
}

impl BackgroundJobs {
    /// Records a background child and returns its job.
    ///
    /// Job ids start at 1 and increment upwards as long as the job list is
    /// non-empty. When all jobs have been reaped, the next job id will be 1.
    pub fn add(&mut self, pid: Pid, command: &Command) -> &BackgroundJob {
        self.job_count += 1;
        self.jobs.push(BackgroundJob {
            id: self.job_count,
            pid,
            command: command.to_string(),
        });
        let job = &self.jobs[self.jobs.len() - 1];
        info!("tracking background job {} ({})", job, job.command);
        job
    }

    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackgroundJob> {
        self.jobs.iter()
    }

    /// Collects every job that has terminated, without blocking.
    ///
    /// Only the tracked pids are waited on, so children owned by other parts
    /// of the process are never reaped by accident. A job whose pid can no
    /// longer be waited on is dropped from the registry.
    pub fn reap(&mut self) -> Vec<(BackgroundJob, ExitStatus)> {
        let mut finished = Vec::new();
        let mut index = 0;
        while index < self.jobs.len() {
            match try_wait_for_process(self.jobs[index].pid) {
                Ok(Some(status)) => {
                    let job = self.jobs.remove(index);
                    info!("reaped background job {}: {}", job, status);
                    finished.push((job, status));
                }
                Ok(None) => index += 1,
                Err(e) => {
                    let job = self.jobs.remove(index);
                    warn!("dropping background job {}: {}", job, e);
                }
            }
        }

        if self.jobs.is_empty() {
            self.job_count = 0;
        }

        finished
    }
}
