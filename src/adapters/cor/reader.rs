use crate::domain::error::InstanceError;
use crate::domain::graph::Cost;
use crate::domain::instance::Instance;
use crate::domain::ports::InstanceSource;
use anyhow::{Context, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};
use tracing::debug;

/// Reads an instance from a `.cor` file on disk.
pub struct CorFileSource {
    path: PathBuf,
}

impl CorFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InstanceSource for CorFileSource {
    fn load(&self) -> Result<Instance> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| InstanceError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let instance = parse_cor(&text)
            .with_context(|| format!("Failed to parse instance file: {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            nodes = instance.node_count,
            edges = instance.edges.len(),
            reserves = instance.reserve_count(),
            "loaded instance"
        );
        Ok(instance)
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    nodes: usize,
    reserves: usize,
    line: usize,
}

#[derive(Debug, Clone, Copy)]
struct Parcel {
    reserve: bool,
    profit: u64,
    cost: Cost,
}

/// Parse the text of a `.cor` instance.
///
/// The `p` header must come before any node or edge line. Every node needs
/// exactly one `n` line, and the number of reserves must match the header.
/// A repeated `b` line overrides the previous one.
pub fn parse_cor(text: &str) -> Result<Instance, InstanceError> {
    let mut header: Option<Header> = None;
    let mut parcels: Vec<Option<Parcel>> = Vec::new();
    let mut edges = Vec::new();
    let mut budget = None;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        last_line = line;
        let mut fields = raw.split_whitespace();
        let Some(tag) = fields.next() else {
            continue;
        };
        match tag {
            "c" => continue,
            "p" => {
                if let Some(previous) = header {
                    return Err(InstanceError::malformed(
                        line,
                        format!("duplicate 'p' header (first on line {})", previous.line),
                    ));
                }
                let nodes = field(&mut fields, line, "node count")?;
                let reserves = field(&mut fields, line, "reserve count")?;
                expect_end(fields, line)?;
                parcels = vec![None; nodes];
                header = Some(Header {
                    nodes,
                    reserves,
                    line,
                });
            }
            "n" => {
                let nodes = declared_nodes(header, line)?;
                let id = node_id(&mut fields, line, nodes)?;
                let reserve = match field::<u8>(&mut fields, line, "reserve flag")? {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(InstanceError::malformed(
                            line,
                            format!("reserve flag must be 0 or 1, got {other}"),
                        ));
                    }
                };
                let profit = field(&mut fields, line, "profit")?;
                let cost = field(&mut fields, line, "cost")?;
                expect_end(fields, line)?;
                if parcels[id].is_some() {
                    return Err(InstanceError::malformed(
                        line,
                        format!("node {id} is defined twice"),
                    ));
                }
                parcels[id] = Some(Parcel {
                    reserve,
                    profit,
                    cost,
                });
            }
            "e" => {
                let nodes = declared_nodes(header, line)?;
                let u = node_id(&mut fields, line, nodes)?;
                let v = node_id(&mut fields, line, nodes)?;
                expect_end(fields, line)?;
                edges.push((u, v));
            }
            "b" => {
                budget = Some(field::<Cost>(&mut fields, line, "budget")?);
                expect_end(fields, line)?;
            }
            other => {
                return Err(InstanceError::malformed(
                    line,
                    format!("unknown line type '{other}'"),
                ));
            }
        }
    }

    let header =
        header.ok_or_else(|| InstanceError::malformed(last_line, "missing 'p' header"))?;

    let mut instance = Instance {
        node_count: header.nodes,
        reserves: Vec::with_capacity(header.nodes),
        profits: Vec::with_capacity(header.nodes),
        costs: Vec::with_capacity(header.nodes),
        edges,
        budget,
    };
    for (id, parcel) in parcels.into_iter().enumerate() {
        let parcel = parcel.ok_or_else(|| {
            InstanceError::malformed(last_line, format!("no 'n' line for node {id}"))
        })?;
        instance.reserves.push(parcel.reserve);
        instance.profits.push(parcel.profit);
        instance.costs.push(parcel.cost);
    }

    let found = instance.reserve_count();
    if found != header.reserves {
        return Err(InstanceError::malformed(
            header.line,
            format!(
                "header declares {} reserves, found {}",
                header.reserves, found
            ),
        ));
    }
    Ok(instance)
}

fn field<T>(fields: &mut SplitWhitespace<'_>, line: usize, name: &str) -> Result<T, InstanceError>
where
    T: FromStr,
    T::Err: Display,
{
    let token = fields
        .next()
        .ok_or_else(|| InstanceError::malformed(line, format!("missing {name}")))?;
    token
        .parse()
        .map_err(|err| InstanceError::malformed(line, format!("invalid {name} '{token}': {err}")))
}

fn node_id(
    fields: &mut SplitWhitespace<'_>,
    line: usize,
    nodes: usize,
) -> Result<usize, InstanceError> {
    let id: usize = field(fields, line, "node id")?;
    if id >= nodes {
        return Err(InstanceError::malformed(
            line,
            format!("node id {id} out of range 0..{nodes}"),
        ));
    }
    Ok(id)
}

fn declared_nodes(header: Option<Header>, line: usize) -> Result<usize, InstanceError> {
    header
        .map(|header| header.nodes)
        .ok_or_else(|| InstanceError::malformed(line, "'p' header must come first"))
}

fn expect_end(mut fields: SplitWhitespace<'_>, line: usize) -> Result<(), InstanceError> {
    match fields.next() {
        None => Ok(()),
        Some(extra) => Err(InstanceError::malformed(
            line,
            format!("unexpected trailing field '{extra}'"),
        )),
    }
}
