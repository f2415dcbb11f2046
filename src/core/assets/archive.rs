//=========================================================================
// Archive Pipeline
//
// Bulk-loads an asset bundle (a zip archive of flat `name.extension`
// entries) into an `AssetBank`.
//
// Flow:
//   open archive
//     → count entries whose file name contains a `.`  (total_to_load)
//     → per entry: classify by extension → read bytes → decode → insert
//     → loaded_count bumped after each completed decode
//
// Two entry points:
// - `AssetBank::load_from_archive`: blocking; archive failure is fatal
//   (logs and exits with `ARCHIVE_FAILURE_EXIT_CODE`).
// - `ArchiveLoadJob` + `AssetBank::absorb`: opt-in background variant.
//   A worker thread only reads entry bytes; decoding (and therefore the
//   counter updates) stays on the calling thread, so progress counters
//   keep their single-threaded reading discipline.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info};
use zip::ZipArchive;

//=== Internal Dependencies ===============================================

use super::{
    entry_file_name, logical_key, ArchiveError, AssetBank, AssetDecoder, AssetKind,
    ARCHIVE_FAILURE_EXIT_CODE,
};

//=== Blocking Loader =====================================================

impl<D: AssetDecoder> AssetBank<D> {
    /// Loads every supported entry of the archive at `path`.
    ///
    /// This is the standard entry point: it blocks until the whole bundle
    /// is decoded. If the archive cannot be opened or read, the error is
    /// logged and the process terminates with
    /// [`ARCHIVE_FAILURE_EXIT_CODE`] — a screen without its asset bundle
    /// is unusable, and nothing upstream can recover it.
    ///
    /// Use [`AssetBank::try_load_from_archive`] to handle the failure
    /// yourself.
    pub fn load_from_archive(&mut self, path: impl AsRef<Path>, decoder: &D) {
        if let Err(e) = self.try_load_from_archive(path, decoder) {
            error!("fatal asset archive failure: {}", e);
            process::exit(ARCHIVE_FAILURE_EXIT_CODE);
        }
    }

    /// Fallible form of [`AssetBank::load_from_archive`].
    ///
    /// Archive-level problems (open, container, entry read) surface as
    /// `Err`; per-entry decode failures do not — they are logged and the
    /// entry is skipped.
    pub fn try_load_from_archive(
        &mut self,
        path: impl AsRef<Path>,
        decoder: &D,
    ) -> Result<(), ArchiveError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(file).map_err(|source| ArchiveError::Container {
            path: path.to_path_buf(),
            source,
        })?;

        self.begin_load();
        self.set_total(count_presumed_loadable(&archive));

        info!(
            "loading {} ({} of {} entries presumed loadable)",
            path.display(),
            self.total_to_load(),
            archive.len()
        );

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|source| ArchiveError::Entry { index, source })?;
            let file_name = entry_file_name(entry.name()).to_owned();

            let Some(kind) = AssetKind::classify(&file_name) else {
                debug!("skipping unclassified entry {:?}", entry.name());
                continue;
            };

            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut bytes)
                .map_err(|source| ArchiveError::EntryRead {
                    name: file_name.clone(),
                    source,
                })?;

            self.insert_decoded(kind, logical_key(&file_name).to_owned(), &bytes, decoder);
        }

        self.finish_load();
        info!(
            "archive complete: {}/{} assets decoded",
            self.loaded_count(),
            self.total_to_load()
        );
        Ok(())
    }

    //--- Background Loader --------------------------------------------------

    /// Drains a background [`ArchiveLoadJob`] into this bank, blocking
    /// until the job finishes.
    ///
    /// Decoding happens here, on the calling thread, as each batch of
    /// bytes arrives — `loaded_count` keeps meaning "decodes completed"
    /// and the counters stay safe to read from the loading thread.
    pub fn absorb(&mut self, job: ArchiveLoadJob, decoder: &D) -> Result<(), ArchiveError> {
        self.begin_load();

        for message in job.receiver.iter() {
            match message {
                JobMessage::Manifest { total } => self.set_total(total),
                JobMessage::Entry(entry) => {
                    if let Some(kind) = AssetKind::classify(&entry.name) {
                        self.insert_decoded(
                            kind,
                            logical_key(&entry.name).to_owned(),
                            &entry.bytes,
                            decoder,
                        );
                    } else {
                        debug!("skipping unclassified entry {:?}", entry.name);
                    }
                }
                JobMessage::Failed(error) => {
                    job.join();
                    return Err(error);
                }
                JobMessage::Finished => break,
            }
        }

        job.join();
        self.finish_load();
        Ok(())
    }
}

/// Counts entries whose bare file name contains a `.`.
///
/// This is the pre-decode estimate stored in `total_to_load`. Entries
/// with unsupported extensions are counted here but skipped later; see
/// the counting note on [`AssetBank`].
fn count_presumed_loadable<R: Read + std::io::Seek>(archive: &ZipArchive<R>) -> usize {
    archive
        .file_names()
        .filter(|name| entry_file_name(name).contains('.'))
        .count()
}

//=== Background Job ======================================================

/// One archive entry's raw bytes, as shipped by the background reader.
#[derive(Debug)]
pub struct ArchiveEntry {
    /// Bare file name (directory part already stripped).
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
enum JobMessage {
    Manifest { total: usize },
    Entry(ArchiveEntry),
    Failed(ArchiveError),
    Finished,
}

/// Opt-in background archive reader.
///
/// Spawns a worker thread that opens the archive and streams each entry's
/// bytes over a bounded channel. The worker does no decoding; pair the
/// job with [`AssetBank::absorb`] on the thread that owns the bank.
///
/// ```no_run
/// # use lumen_engine::core::assets::{ArchiveLoadJob, AssetBank};
/// # use lumen_engine::StockDecoder;
/// let job = ArchiveLoadJob::spawn("assets/title.zip".into());
/// // ... other init work ...
/// let mut bank = AssetBank::new();
/// bank.absorb(job, &StockDecoder)?;
/// # Ok::<(), lumen_engine::core::assets::ArchiveError>(())
/// ```
pub struct ArchiveLoadJob {
    receiver: Receiver<JobMessage>,
    handle: thread::JoinHandle<()>,
}

impl ArchiveLoadJob {
    /// Starts reading the archive at `path` on a worker thread.
    ///
    /// Open failures are reported through the channel when the job is
    /// absorbed, not here.
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = bounded(8);
        let handle = thread::spawn(move || read_entries(&path, &sender));
        Self { receiver, handle }
    }

    fn join(self) {
        if self.handle.join().is_err() {
            error!("archive reader thread panicked");
        }
    }
}

/// Worker body: opens the archive and ships manifest + entry bytes.
fn read_entries(path: &Path, sender: &Sender<JobMessage>) {
    // A send error means the absorbing side went away; stop quietly.
    macro_rules! send_or_return {
        ($message:expr) => {
            if sender.send($message).is_err() {
                return;
            }
        };
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            send_or_return!(JobMessage::Failed(ArchiveError::Open {
                path: path.to_path_buf(),
                source,
            }));
            return;
        }
    };
    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(source) => {
            send_or_return!(JobMessage::Failed(ArchiveError::Container {
                path: path.to_path_buf(),
                source,
            }));
            return;
        }
    };

    send_or_return!(JobMessage::Manifest {
        total: count_presumed_loadable(&archive),
    });

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(source) => {
                send_or_return!(JobMessage::Failed(ArchiveError::Entry { index, source }));
                return;
            }
        };
        let name = entry_file_name(entry.name()).to_owned();
        if name.is_empty() {
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        if let Err(source) = entry.read_to_end(&mut bytes) {
            send_or_return!(JobMessage::Failed(ArchiveError::EntryRead { name, source }));
            return;
        }

        send_or_return!(JobMessage::Entry(ArchiveEntry { name, bytes }));
    }

    let _ = sender.send(JobMessage::Finished);
}

//=========================================================================
// Unit Tests
//=========================================================================
