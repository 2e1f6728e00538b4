//! Non-interactive mode: fetch once, print, exit.

use std::io::{self, Write};

use convo_tree::{extract_first_url, ChainsPayload};

use crate::app::{ChainsView, LoadedTree, Viewer};
use crate::fetch::ApiClient;
use crate::render::format_timestamp;

/// Fetch the viewer's source once and print what it would show.
pub async fn run_once<W: Write>(mut viewer: Viewer, client: &ApiClient, out: &mut W) -> Result<(), anyhow::Error> {
    let target = viewer.target();
    viewer.begin_fetch();
    let result = client.fetch(&target).await;
    viewer.finish_fetch(result);

    match &viewer {
        Viewer::Chains(v) => {
            if let Some(err) = &v.error {
                return Err(anyhow::anyhow!("{}", err));
            }
            write_chains(v, out)?;
        }
        Viewer::Tree(v) => {
            if let Some(err) = &v.error {
                return Err(anyhow::anyhow!("{}", err));
            }
            match &v.loaded {
                Some(loaded) => write_tree(loaded, out)?,
                None => writeln!(out, "No tree loaded.")?,
            }
        }
    }
    out.flush()?;
    Ok(())
}

pub fn write_chains<W: Write>(view: &ChainsView, out: &mut W) -> io::Result<()> {
    let Some(payload) = &view.payload else {
        return writeln!(out, "The server has not finished a run yet.");
    };
    write_payload(payload, out)
}

fn write_payload<W: Write>(payload: &ChainsPayload, out: &mut W) -> io::Result<()> {
    writeln!(out, "Last run: {}", format_timestamp(&payload.last_run_at))?;
    let total = payload.total();
    writeln!(out, "{} conversations", total)?;

    for i in 0..payload.conversation_chains.len() {
        writeln!(out)?;
        writeln!(out, "── {}/{} ──", i + 1, total)?;
        let Some(chain) = payload.resolve_chain(i) else {
            continue;
        };
        for (_, tweet) in chain {
            let linked = extract_first_url(&tweet.text);
            writeln!(out, "{}", tweet.author_name)?;
            match linked.url {
                Some(url) => writeln!(out, "  {} <{}>", linked.text.trim_end(), url)?,
                None => writeln!(out, "  {}", linked.text)?,
            }
            for photo in tweet.photo_urls() {
                writeln!(out, "  [photo] {}", photo)?;
            }
            writeln!(out, "  {}", tweet.created_at)?;
        }
    }
    Ok(())
}

/// Every root-to-leaf path, then the computed position of each node.
pub fn write_tree<W: Write>(loaded: &LoadedTree, out: &mut W) -> io::Result<()> {
    let total = loaded.paths.len();
    writeln!(out, "{} nodes, {} conversations", loaded.tree.len(), total)?;

    for (i, path) in loaded.paths.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "── {}/{} ──", i + 1, total)?;
        for id in path {
            writeln!(out, "  [{}] {}", id, loaded.tree.text(id))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{:<16} {:>10} {:>10} {:>6} {:>6}", "id", "x", "y", "depth", "leaves")?;
    for p in loaded.layout.placements() {
        writeln!(
            out,
            "{:<16} {:>10.1} {:>10.1} {:>6} {:>6}",
            p.id,
            p.x,
            p.y,
            p.depth,
            loaded.counts.get(&p.id).unwrap_or(0)
        )?;
    }
    Ok(())
}
