//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use mesh::io::stl::{check_solid_name, decode_stl, detect_encoding, StlEncoding};
use mesh::io::{load_mesh, save_stl, MeshFormat};
use mesh::types::{Mesh, Point3};
use mesh::validate::{diagnose as run_diagnose, ValidationParams};

fn load(input: &Path) -> Result<Mesh> {
    load_mesh(input).with_context(|| format!("failed to read {}", input.display()))
}

pub fn convert(input: &Path, output: &Path, name: Option<&str>, binary: bool) -> Result<()> {
    if MeshFormat::from_path(output) != Some(MeshFormat::Stl) {
        bail!("output must be an .stl file: {}", output.display());
    }
    if let Some(name) = name {
        check_solid_name(name).context("invalid --name")?;
    }

    let mut mesh = load(input)?;
    if let Some(name) = name {
        mesh.name = name.to_string();
    }

    save_stl(&mesh, output, binary)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} -> {} ({} triangles, {})",
        input.display(),
        output.display(),
        mesh.triangle_count(),
        if binary { "binary" } else { "ascii" }
    );
    Ok(())
}

pub fn diagnose(input: &Path, strict: bool, serial: bool, deny: bool) -> Result<()> {
    let mesh = load(input)?;
    let params = if strict {
        ValidationParams::strict()
    } else {
        ValidationParams::default()
    }
    .with_parallel(!serial);

    let report = run_diagnose(&mesh, &params)
        .with_context(|| format!("failed to check {}", input.display()))?;
    println!("{report}");

    if deny && !report.is_clean() {
        let failed: Vec<&str> = report.violations().map(|(rule, _)| rule.name()).collect();
        bail!("{} violates: {}", input.display(), failed.join(", "));
    }
    Ok(())
}

pub fn info(input: &Path) -> Result<()> {
    let format = MeshFormat::from_path(input);

    let (mesh, encoding) = if format == Some(MeshFormat::Stl) {
        let bytes =
            std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
        let mesh =
            decode_stl(&bytes).with_context(|| format!("failed to decode {}", input.display()))?;
        (mesh, Some(detect_encoding(&bytes)))
    } else {
        (load(input)?, None)
    };

    println!("file:      {}", input.display());
    println!(
        "format:    {}{}",
        format.map_or("unknown", |f| f.name()),
        match encoding {
            Some(StlEncoding::Ascii) => " (ascii)",
            Some(StlEncoding::Binary) => " (binary)",
            None => "",
        }
    );
    println!(
        "name:      {}",
        if mesh.name.is_empty() { "(unnamed)" } else { mesh.name.as_str() }
    );
    println!("triangles: {}", mesh.triangle_count());
    if let Some((min, max)) = bounds(&mesh) {
        println!("min:       [{}, {}, {}]", min.x, min.y, min.z);
        println!("max:       [{}, {}, {}]", max.x, max.y, max.z);
    }
    Ok(())
}

/// Axis-aligned bounds of every vertex, `None` for an empty mesh.
fn bounds(mesh: &Mesh) -> Option<(Point3<f32>, Point3<f32>)> {
    let mut vertices = mesh.triangles.iter().flat_map(|t| t.vertices());
    let first = vertices.next()?;
    Some(vertices.fold((first, first), |(min, max), v| {
        (min.inf(&v), max.sup(&v))
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh::types::{tetrahedron, unit_square};
    use tempfile::tempdir;

    const SQUARE_OBJ: &str = "o plate\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    #[test]
    fn convert_obj_to_binary_stl() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plate.obj");
        let output = dir.path().join("plate.stl");
        std::fs::write(&input, SQUARE_OBJ).unwrap();

        convert(&input, &output, None, true).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(detect_encoding(&bytes), StlEncoding::Binary);
        assert_eq!(load_mesh(&output).unwrap().triangle_count(), 2);
    }

    #[test]
    fn convert_renames_ascii_solid() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plate.obj");
        let output = dir.path().join("plate.stl");
        std::fs::write(&input, SQUARE_OBJ).unwrap();

        convert(&input, &output, Some("renamed"), false).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("solid renamed"));
        assert_eq!(load_mesh(&output).unwrap().name, "renamed");
    }

    #[test]
    fn convert_rejects_non_stl_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plate.obj");
        std::fs::write(&input, SQUARE_OBJ).unwrap();

        let err = convert(&input, &dir.path().join("plate.obj2"), None, false).unwrap_err();
        assert!(err.to_string().contains("output must be an .stl file"));
    }

    #[test]
    fn convert_rejects_invalid_name_before_writing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plate.obj");
        let output = dir.path().join("plate.stl");
        std::fs::write(&input, SQUARE_OBJ).unwrap();

        for name in ["my part", "facet"] {
            let err = convert(&input, &output, Some(name), false).unwrap_err();
            assert!(err.to_string().contains("invalid --name"));
            assert!(!output.exists());
        }
    }

    #[test]
    fn info_reads_both_encodings() {
        let dir = tempdir().unwrap();
        let ascii = dir.path().join("ascii.stl");
        let binary = dir.path().join("binary.stl");
        save_stl(&tetrahedron(), &ascii, false).unwrap();
        save_stl(&tetrahedron(), &binary, true).unwrap();

        info(&ascii).unwrap();
        info(&binary).unwrap();
    }

    #[test]
    fn info_reports_corrupt_stl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.stl");
        std::fs::write(&path, [0u8; 90]).unwrap();

        let err = info(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode"));
    }

    #[test]
    fn missing_input_has_context() {
        let dir = tempdir().unwrap();
        let err = info(&dir.path().join("missing.stl")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn diagnose_deny_fails_on_open_mesh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("square.stl");
        save_stl(&unit_square(), &path, false).unwrap();

        diagnose(&path, false, true, false).unwrap();
        let err = diagnose(&path, false, true, true).unwrap_err();
        assert!(err.to_string().contains("shared edge"));
    }

    #[test]
    fn diagnose_deny_passes_closed_mesh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tet.stl");
        save_stl(&tetrahedron(), &path, true).unwrap();

        diagnose(&path, true, false, true).unwrap();
    }

    #[test]
    fn bounds_of_square() {
        let (min, max) = bounds(&unit_square()).unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
        assert!(bounds(&Mesh::new()).is_none());
    }
}
