//! Whitespace-separated text formats for sites, triangulations and diagrams.
//!
//! # Site list
//!
//! A count `n` followed by `n` pairs `x y`. Tokens may be split across lines
//! freely. Sites get identities `1..=n` in input order.
//!
//! # Triangulation
//!
//! ```text
//! n
//! id x y            (one line per site, input order)
//! h
//! origin destination  (one line per half-edge, by origin in input order,
//!                      destinations ascending)
//! ```
//!
//! # Diagram
//!
//! ```text
//! V E F
//! x y edge          (one line per vertex)
//! x y edge          (one line per face: its site and one boundary half-edge)
//! origin twin face next prev  (one line per half-edge, face 0 = outside)
//! ```
//!
//! Vertices are numbered from 1 in descending sweep order. Half-edges are
//! numbered from 1 grouped by origin, then by descending sweep order of their
//! destination. Faces are numbered from 1 by descending sweep order of their
//! site. The numbering is computed here and nowhere else.
//!
//! # Example
//!
//! ```
//! use dualmesh::io::{read_sites, write_triangulation};
//! use dualmesh::triangulation::triangulate;
//!
//! let sites = read_sites("3\n0 0\n10 0\n5 8\n".as_bytes()).unwrap();
//! let tri = triangulate(&sites).unwrap();
//!
//! let mut out = Vec::new();
//! write_triangulation(&mut out, &tri).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("3\n1 0 0\n2 10 0\n3 5 8\n6\n"));
//! ```

use crate::dcel::{EdgeId, FaceId, VertexId};
use crate::error::TextFormatError;
use crate::triangulation::{Site, Triangulation, VoronoiDiagram};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Splits the input into tokens tagged with their 1-based line number.
struct Tokens {
    tokens: Vec<(usize, String)>,
    pos: usize,
    last_line: usize,
}

impl Tokens {
    fn read(reader: impl BufRead) -> Result<Self, TextFormatError> {
        let mut tokens = Vec::new();
        let mut last_line = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            last_line = i + 1;
            tokens.extend(line.split_whitespace().map(|t| (i + 1, t.to_owned())));
        }
        Ok(Self {
            tokens,
            pos: 0,
            last_line,
        })
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, TextFormatError> {
        let Some((line, token)) = self.tokens.get(self.pos) else {
            return Err(TextFormatError::Parse {
                line: self.last_line.max(1),
                message: format!("unexpected end of input, expected {what}"),
            });
        };
        self.pos += 1;
        token.parse().map_err(|_| TextFormatError::Parse {
            line: *line,
            message: format!("expected {what}, found `{token}`"),
        })
    }

    fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    fn finish(&self) -> Result<(), TextFormatError> {
        match self.tokens.get(self.pos) {
            Some((line, token)) => Err(TextFormatError::Parse {
                line: *line,
                message: format!("unexpected trailing token `{token}`"),
            }),
            None => Ok(()),
        }
    }
}

/// Reads a site list.
pub fn read_sites(reader: impl BufRead) -> Result<Vec<Site>, TextFormatError> {
    let mut tokens = Tokens::read(reader)?;
    let count: u32 = tokens.next("a site count")?;
    let available = tokens.remaining() / 2;
    if count as usize > available {
        return Err(TextFormatError::Parse {
            line: tokens.last_line.max(1),
            message: format!("site count {count} exceeds the {available} coordinate pairs present"),
        });
    }

    let mut sites = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let x = tokens.next("an integer x coordinate")?;
        let y = tokens.next("an integer y coordinate")?;
        sites.push(Site::new(id, x, y));
    }
    tokens.finish()?;

    tracing::debug!(count = sites.len(), "read site list");
    Ok(sites)
}

/// Writes the sites and every half-edge of a triangulation.
pub fn write_triangulation(mut w: impl Write, triangulation: &Triangulation) -> Result<(), TextFormatError> {
    let sites = triangulation.sites();
    writeln!(w, "{}", sites.len())?;
    for site in sites {
        writeln!(w, "{} {} {}", site.id, site.point.x, site.point.y)?;
    }

    let pairs = triangulation.incident_pairs();
    writeln!(w, "{}", pairs.len())?;
    for (origin, destination) in pairs {
        writeln!(w, "{origin} {destination}")?;
    }
    Ok(())
}

/// Writes a complete edge-list dump of a diagram.
pub fn write_diagram(mut w: impl Write, diagram: &VoronoiDiagram) -> Result<(), TextFormatError> {
    let numbering = Numbering::new(diagram);
    let mesh = diagram.mesh();

    writeln!(
        w,
        "{} {} {}",
        numbering.vertices.len(),
        diagram.num_edges(),
        numbering.faces.len()
    )?;

    for &v in &numbering.vertices {
        let p = mesh.point(v);
        let edge = mesh
            .incident_edges(v)
            .map(|e| numbering.edge(e))
            .min()
            .unwrap_or(0);
        writeln!(w, "{} {} {}", p.x, p.y, edge)?;
    }

    for &f in &numbering.faces {
        let p = diagram
            .site_of_face(f)
            .map(|s| s.point.to_f64())
            .unwrap_or_else(|| mesh.point(mesh.origin(mesh.chain(f))));
        writeln!(w, "{} {} {}", p.x, p.y, numbering.edge(mesh.chain(f)))?;
    }

    for &e in &numbering.edges {
        writeln!(
            w,
            "{} {} {} {} {}",
            numbering.vertex(mesh.origin(e)),
            numbering.edge(mesh.twin(e)),
            mesh.face(e).map_or(0, |f| numbering.face(f)),
            numbering.edge(mesh.next(e)),
            numbering.edge(mesh.prev(e)),
        )?;
    }
    Ok(())
}

/// Deterministic 1-based identities for the live entities of a diagram.
struct Numbering {
    vertices: Vec<VertexId>,
    edges: Vec<EdgeId>,
    faces: Vec<FaceId>,
    vertex_ids: HashMap<VertexId, usize>,
    edge_ids: HashMap<EdgeId, usize>,
    face_ids: HashMap<FaceId, usize>,
}

impl Numbering {
    fn new(diagram: &VoronoiDiagram) -> Self {
        let mesh = diagram.mesh();
        let vertices = mesh.vertices_in_sweep_order();
        let vertex_ids: HashMap<VertexId, usize> = vertices.iter().zip(1..).map(|(&v, i)| (v, i)).collect();

        let mut edges = Vec::with_capacity(2 * diagram.num_edges());
        for &v in &vertices {
            let mut out: Vec<EdgeId> = mesh.incident_edges(v).collect();
            out.sort_by_key(|&e| vertex_ids.get(&mesh.destination(e)).copied().unwrap_or(usize::MAX));
            edges.extend(out);
        }
        let edge_ids = edges.iter().zip(1..).map(|(&e, i)| (e, i)).collect();

        let mut faces: Vec<FaceId> = mesh.faces().collect();
        let key = |f| diagram.site_of_face(f).map(|s: Site| s.point);
        faces.sort_by(|&a, &b| match (key(a), key(b)) {
            (Some(p), Some(q)) => q.sweep_cmp(&p),
            _ => a.cmp(&b),
        });
        let face_ids = faces.iter().zip(1..).map(|(&f, i)| (f, i)).collect();

        Self {
            vertices,
            edges,
            faces,
            vertex_ids,
            edge_ids,
            face_ids,
        }
    }

    fn vertex(&self, v: VertexId) -> usize {
        self.vertex_ids.get(&v).copied().unwrap_or(0)
    }

    fn edge(&self, e: EdgeId) -> usize {
        self.edge_ids.get(&e).copied().unwrap_or(0)
    }

    fn face(&self, f: FaceId) -> usize {
        self.face_ids.get(&f).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::{triangulate, voronoi};

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_read_sites() {
        let sites = read_sites("4\n0 0\n4 0 4\n4\n0 4\n".as_bytes()).unwrap();
        assert_eq!(
            sites,
            vec![
                Site::new(1, 0, 0),
                Site::new(2, 4, 0),
                Site::new(3, 4, 4),
                Site::new(4, 0, 4),
            ]
        );
    }

    #[test]
    fn test_read_sites_negative_coordinates() {
        let sites = read_sites("2\n-3 7\n5 -11\n".as_bytes()).unwrap();
        assert_eq!(sites[0].point.x, -3);
        assert_eq!(sites[1].point.y, -11);
    }

    #[test]
    fn test_read_sites_reports_line() {
        let err = read_sites("3\n0 0\n1 x\n2 2\n".as_bytes()).unwrap_err();
        match err {
            TextFormatError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("`x`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_sites_truncated() {
        let err = read_sites("3\n0 0\n1 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TextFormatError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_sites_count_larger_than_input() {
        let err = read_sites("4000000000\n0 0\n".as_bytes()).unwrap_err();
        match err {
            TextFormatError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("4000000000"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_sites_trailing_token() {
        let err = read_sites("1\n0 0\n9\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TextFormatError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_sites_empty() {
        let err = read_sites("".as_bytes()).unwrap_err();
        assert!(matches!(err, TextFormatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_write_triangulation() {
        let sites = vec![Site::new(1, 0, 0), Site::new(2, 10, 0), Site::new(3, 5, 8)];
        let tri = triangulate(&sites).unwrap();
        let mut out = Vec::new();
        write_triangulation(&mut out, &tri).unwrap();

        let lines = lines(out);
        assert_eq!(
            lines,
            vec!["3", "1 0 0", "2 10 0", "3 5 8", "6", "1 2", "1 3", "2 1", "2 3", "3 1", "3 2"]
        );
    }

    #[test]
    fn test_write_diagram() {
        let sites = vec![Site::new(1, 0, 0), Site::new(2, 10, 0), Site::new(3, 5, 8)];
        let diagram = voronoi(&triangulate(&sites).unwrap()).unwrap();
        let mut out = Vec::new();
        write_diagram(&mut out, &diagram).unwrap();

        let lines = lines(out);
        assert_eq!(lines[0], "8 10 3");
        assert_eq!(lines.len(), 1 + 8 + 3 + 20);

        // The top-left frame corner comes first.
        let first: Vec<f64> = lines[1].split(' ').map(|t| t.parse().unwrap()).collect();
        assert_eq!(&first[..2], &[-5.0, 13.0]);

        // Faces run top to bottom, so the apex site owns face 1.
        assert_eq!(lines[9].split(' ').take(2).collect::<Vec<_>>(), vec!["5", "8"]);

        // Every half-edge line references valid identities, and twins pair up.
        let records: Vec<Vec<usize>> = lines[12..]
            .iter()
            .map(|l| l.split(' ').map(|t| t.parse().unwrap()).collect())
            .collect();
        for (i, r) in records.iter().enumerate() {
            assert!((1..=8).contains(&r[0]));
            assert!(r[2] <= 3);
            assert_eq!(records[r[1] - 1][1], i + 1);
            assert_eq!(records[r[3] - 1][4], i + 1);
        }
    }

    #[test]
    fn test_write_diagram_is_deterministic() {
        let sites = vec![
            Site::new(1, 0, 0),
            Site::new(2, 7, 1),
            Site::new(3, 3, 9),
            Site::new(4, 4, 3),
        ];
        let diagram = voronoi(&triangulate(&sites).unwrap()).unwrap();
        let (mut a, mut b) = (Vec::new(), Vec::new());
        write_diagram(&mut a, &diagram).unwrap();
        write_diagram(&mut b, &diagram.clone()).unwrap();
        assert_eq!(a, b);
    }
}
