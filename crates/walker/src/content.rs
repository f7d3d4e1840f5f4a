use crossbeam_channel::bounded;

use crate::cancel::CancellationToken;
use crate::types::FileDescriptor;

/// Phase 2: reads every descriptor's file content using a bounded pool of
/// `concurrency` worker threads. Each descriptor is assigned to exactly one
/// worker via the channel, so `content`/`error` are written without a lock.
/// A per-file error never aborts the walk; it is attached to the
/// descriptor.
pub(crate) fn fill_content(
    mut descriptors: Vec<FileDescriptor>,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Vec<FileDescriptor> {
    if descriptors.is_empty() {
        return descriptors;
    }

    let (sender, receiver) = bounded::<usize>(descriptors.len());
    for index in 0..descriptors.len() {
        sender.send(index).expect("channel just created, cannot be disconnected");
    }
    drop(sender);

    let workers = concurrency.max(1).min(descriptors.len());
    let results: Vec<(usize, std::io::Result<String>)> = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let receiver = receiver.clone();
            let descriptors = &descriptors;
            let cancel = cancel.clone();
            handles.push(scope.spawn(move || {
                let mut local = Vec::new();
                for index in receiver.iter() {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let path = &descriptors[index].abs_path;
                    local.push((index, std::fs::read_to_string(path)));
                }
                local
            }));
        }
        handles.into_iter().flat_map(|h| h.join().expect("walker worker thread panicked")).collect()
    });

    for (index, result) in results {
        match result {
            Ok(content) => descriptors[index].content = content,
            Err(err) => {
                log::warn!("error reading {}: {}", descriptors[index].abs_path.display(), err);
                descriptors[index].error = Some(err.to_string());
            }
        }
    }

    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn descriptor(path: PathBuf, rel: &str) -> FileDescriptor {
        FileDescriptor::new(rel.to_string(), path, 0, false)
    }

    #[test]
    fn reads_every_file_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..20 {
            let path = dir.path().join(format!("f{i}.txt"));
            std::fs::write(&path, format!("content-{i}")).unwrap();
            paths.push(descriptor(path, &format!("f{i}.txt")));
        }
        let cancel = CancellationToken::new();
        let filled = fill_content(paths, 4, &cancel);
        for (i, fd) in filled.iter().enumerate() {
            assert_eq!(fd.content, format!("content-{i}"));
            assert!(fd.error.is_none());
        }
    }

    #[test]
    fn missing_file_produces_descriptor_error_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");
        let cancel = CancellationToken::new();
        let filled = fill_content(vec![descriptor(missing, "gone.txt")], 2, &cancel);
        assert!(filled[0].error.is_some());
    }
}
