//! Build a [`Mesh`] from STL ASCII tokens.
//!
//! The grammar is fixed, so the parser works positionally: it collects the
//! positions of every `normal` and `vertex` keyword in one pass, checks that
//! the counts agree with the number of `facet` keywords, then reads the
//! coordinates that follow each keyword.

use mesh_types::{Mesh, Point3, Triangle, Vector3};

use super::token::{Keyword, Token, COORDS_PER_RECORD};
use crate::error::{IoError, IoResult};

/// Parse a token stream produced by [`tokenize`](super::tokenize).
///
/// - The mesh name is the word after `solid` when the same word is also the
///   last token (after `endsolid`); otherwise the name is empty.
/// - The `i`-th `normal` fills `normals[i]`.
/// - Vertices are grouped in runs of three in file order; the `i`-th run
///   becomes `triangles[i]`.
///
/// # Errors
///
/// - [`IoError::EmptyInput`] for an empty token slice
/// - [`IoError::InconsistentFacetCount`] if there are not exactly one
///   `normal` and three `vertex` keywords per `facet`
/// - [`IoError::TruncatedRecord`] if a keyword is not followed by three
///   number tokens
///
/// # Example
///
/// ```
/// use mesh_io::stl::{parse, tokenize};
///
/// let text = "solid tri facet normal 0 0 1 outer loop \
///             vertex 0 0 0 vertex 1 0 0 vertex 0 1 0 \
///             endloop endfacet endsolid tri";
/// let mesh = parse(&tokenize(text).unwrap()).unwrap();
/// assert_eq!(mesh.name, "tri");
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn parse(tokens: &[Token<'_>]) -> IoResult<Mesh> {
    if tokens.is_empty() {
        return Err(IoError::EmptyInput);
    }

    let mut facets = 0usize;
    let mut normal_at = Vec::new();
    let mut vertex_at = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Keyword(Keyword::Facet) => facets += 1,
            Token::Keyword(Keyword::Normal) => normal_at.push(index),
            Token::Keyword(Keyword::Vertex) => vertex_at.push(index),
            _ => {}
        }
    }

    if normal_at.len() != facets || vertex_at.len() != facets * 3 {
        return Err(IoError::InconsistentFacetCount {
            facets,
            normals: normal_at.len(),
            vertices: vertex_at.len(),
        });
    }

    let mut mesh = Mesh::with_capacity(facets);
    mesh.name = solid_name(tokens).to_string();

    for (&keyword_index, triangle) in normal_at
        .iter()
        .zip(VertexTriples::new(tokens, &vertex_at))
    {
        let normal = read_coordinates(tokens, keyword_index)?;
        mesh.push(triangle?, Vector3::from(normal));
    }

    tracing::debug!(
        triangles = mesh.triangle_count(),
        name = %mesh.name,
        "parsed STL ASCII tokens"
    );
    Ok(mesh)
}

/// The solid label, if the opening and closing labels match.
fn solid_name<'a>(tokens: &[Token<'a>]) -> &'a str {
    match tokens {
        [Token::Keyword(Keyword::Solid), Token::Word(open), .., Token::Keyword(Keyword::EndSolid), Token::Word(close)]
            if open == close =>
        {
            *open
        }
        _ => "",
    }
}

/// Read the three numbers following the keyword at `keyword_index`.
fn read_coordinates(tokens: &[Token<'_>], keyword_index: usize) -> IoResult<[f32; 3]> {
    let mut coords = [0.0f32; COORDS_PER_RECORD];
    for (found, slot) in coords.iter_mut().enumerate() {
        *slot = tokens
            .get(keyword_index + 1 + found)
            .and_then(Token::as_number)
            .ok_or(IoError::TruncatedRecord {
                token_index: keyword_index,
                expected: COORDS_PER_RECORD,
                found,
            })?;
    }
    Ok(coords)
}

/// Iterator over the triangles formed by consecutive `vertex` records.
///
/// Groups the given `vertex` keyword positions in runs of three and yields
/// one [`Triangle`] per complete run. A trailing incomplete run is not
/// yielded; [`parse`] rejects such input before iterating.
#[derive(Debug, Clone)]
pub struct VertexTriples<'t, 'a> {
    tokens: &'t [Token<'a>],
    runs: std::slice::ChunksExact<'t, usize>,
}

impl<'t, 'a> VertexTriples<'t, 'a> {
    /// Iterate over `vertex_at`, the token indices of `vertex` keywords.
    #[must_use]
    pub fn new(tokens: &'t [Token<'a>], vertex_at: &'t [usize]) -> Self {
        Self {
            tokens,
            runs: vertex_at.chunks_exact(3),
        }
    }
}

impl Iterator for VertexTriples<'_, '_> {
    type Item = IoResult<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        let run = self.runs.next()?;
        Some(read_triangle(self.tokens, run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.runs.size_hint()
    }
}

impl ExactSizeIterator for VertexTriples<'_, '_> {}

fn read_triangle(tokens: &[Token<'_>], run: &[usize]) -> IoResult<Triangle> {
    let mut corners = [Point3::origin(); 3];
    for (corner, &keyword_index) in corners.iter_mut().zip(run) {
        *corner = Point3::from(read_coordinates(tokens, keyword_index)?);
    }
    let [v0, v1, v2] = corners;
    Ok(Triangle::new(v0, v1, v2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::stl::tokenize;

    const SQUARE: &str = "solid square
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 0.0 0.0 0.0
      vertex 1.0 0.0 0.0
      vertex 0.0 1.0 0.0
    endloop
  endfacet
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 1.0 1.0 0.0
      vertex 0.0 1.0 0.0
      vertex 1.0 0.0 0.0
    endloop
  endfacet
endsolid square
";

    #[test]
    fn parse_square() {
        let mesh = parse(&tokenize(SQUARE).unwrap()).unwrap();

        assert_eq!(mesh.name, "square");
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(
            mesh.triangles[0].to_arrays(),
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
        assert_eq!(
            mesh.triangles[1].to_arrays(),
            [[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]
        );
        assert_eq!(mesh.normals, vec![Vector3::z(), Vector3::z()]);
    }

    #[test]
    fn mismatched_labels_give_empty_name() {
        let text = SQUARE.replace("endsolid square", "endsolid other");
        let mesh = parse(&tokenize(&text).unwrap()).unwrap();
        assert_eq!(mesh.name, "");
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn opening_label_only_gives_empty_name() {
        let text = SQUARE.replace("endsolid square", "endsolid");
        let mesh = parse(&tokenize(&text).unwrap()).unwrap();
        assert_eq!(mesh.name, "");
    }

    #[test]
    fn unnamed_solid() {
        let text = SQUARE
            .replace("solid square", "solid")
            .replace("endsolid square", "endsolid");
        let mesh = parse(&tokenize(&text).unwrap()).unwrap();
        assert_eq!(mesh.name, "");
    }

    #[test]
    fn empty_solid_has_no_triangles() {
        let mesh = parse(&tokenize("solid empty endsolid empty").unwrap()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.name, "empty");
    }

    #[test]
    fn missing_vertex_is_inconsistent() {
        let text = SQUARE.replacen("      vertex 1.0 0.0 0.0\n", "", 1);
        let err = parse(&tokenize(&text).unwrap()).unwrap_err();
        match err {
            IoError::InconsistentFacetCount {
                facets,
                normals,
                vertices,
            } => {
                assert_eq!(facets, 2);
                assert_eq!(normals, 2);
                assert_eq!(vertices, 5);
            }
            other => panic!("expected InconsistentFacetCount, got {other:?}"),
        }
    }

    #[test]
    fn extra_facet_keyword_is_inconsistent() {
        let text = SQUARE.replace("endsolid square", "facet endsolid square");
        let err = parse(&tokenize(&text).unwrap()).unwrap_err();
        assert!(matches!(err, IoError::InconsistentFacetCount { facets: 3, .. }));
    }

    #[test]
    fn hand_built_short_record_is_truncated() {
        let tokens = [
            Token::Keyword(Keyword::Facet),
            Token::Keyword(Keyword::Normal),
            Token::Number(0.0),
            Token::Keyword(Keyword::Vertex),
            Token::Number(0.0),
            Token::Number(0.0),
            Token::Number(0.0),
            Token::Keyword(Keyword::Vertex),
            Token::Number(1.0),
            Token::Number(0.0),
            Token::Number(0.0),
            Token::Keyword(Keyword::Vertex),
            Token::Number(0.0),
            Token::Number(1.0),
            Token::Number(0.0),
        ];
        let err = parse(&tokens).unwrap_err();
        assert!(matches!(
            err,
            IoError::TruncatedRecord {
                token_index: 1,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn empty_token_slice() {
        assert!(matches!(parse(&[]), Err(IoError::EmptyInput)));
    }

    #[test]
    fn vertex_triples_group_in_file_order() {
        let tokens = tokenize(SQUARE).unwrap();
        let vertex_at: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is(Keyword::Vertex))
            .map(|(i, _)| i)
            .collect();

        let triples = VertexTriples::new(&tokens, &vertex_at);
        assert_eq!(triples.len(), 2);

        let triangles: Vec<Triangle> = triples.collect::<IoResult<_>>().unwrap();
        assert_eq!(triangles[1].v0, Point3::new(1.0, 1.0, 0.0));
    }
}
