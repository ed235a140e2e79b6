use gltf::json;
use gltf::json::validation::{Checked, USize64};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use voroprism::{Mesh, PrismCell};

/// Accumulates all prisms into one vertex-colored triangle primitive and
/// writes a binary glTF.
struct GltfBuilder {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl GltfBuilder {
    fn new() -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn add_prism(&mut self, prism: &PrismCell) {
        let color = [
            prism.color.r as f32 / 255.0,
            prism.color.g as f32 / 255.0,
            prism.color.b as f32 / 255.0,
        ];
        self.add_mesh(&prism.prism.bottom, color);
        self.add_mesh(&prism.prism.top, color);
        self.add_mesh(&prism.prism.side, color);
    }

    fn add_mesh(&mut self, mesh: &Mesh, color: [f32; 3]) {
        let base_index = self.positions.len() as u32;
        for i in 0..mesh.vertex_count() {
            // glTF is y-up; the pipeline's z (height) becomes the viewer's y.
            self.positions
                .push([mesh.x[i] as f32, mesh.z[i] as f32, mesh.y[i] as f32]);
            self.colors.push(color);
        }
        self.indices
            .extend(mesh.triangles.iter().map(|&idx| base_index + idx));
    }

    fn save(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut buffer_data = Vec::new();

        // Positions (Vec3 f32)
        let pos_offset = buffer_data.len();
        for p in &self.positions {
            for c in p {
                buffer_data.write_all(&c.to_le_bytes())?;
            }
        }
        let pos_len = buffer_data.len() - pos_offset;

        // Colors (Vec3 f32)
        let col_offset = buffer_data.len();
        for p in &self.colors {
            for c in p {
                buffer_data.write_all(&c.to_le_bytes())?;
            }
        }
        let col_len = buffer_data.len() - col_offset;

        // Padding for indices (must be aligned to 4 bytes)
        while buffer_data.len() % 4 != 0 {
            buffer_data.push(0);
        }

        // Indices (Scalar u32)
        let ind_offset = buffer_data.len();
        for i in &self.indices {
            buffer_data.write_all(&i.to_le_bytes())?;
        }
        let ind_len = buffer_data.len() - ind_offset;

        // Min/Max for positions
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in &self.positions {
            for i in 0..3 {
                if p[i] < min[i] {
                    min[i] = p[i];
                }
                if p[i] > max[i] {
                    max[i] = p[i];
                }
            }
        }

        let buffer = json::Buffer {
            byte_length: USize64(buffer_data.len() as u64),
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
        };

        let buffer_view_pos = json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: USize64(pos_len as u64),
            byte_offset: Some(USize64(pos_offset as u64)),
            byte_stride: Some(json::buffer::Stride(12)),
            name: None,
            target: Some(Checked::Valid(json::buffer::Target::ArrayBuffer)),
            extensions: Default::default(),
            extras: Default::default(),
        };

        let buffer_view_col = json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: USize64(col_len as u64),
            byte_offset: Some(USize64(col_offset as u64)),
            byte_stride: Some(json::buffer::Stride(12)),
            name: None,
            target: Some(Checked::Valid(json::buffer::Target::ArrayBuffer)),
            extensions: Default::default(),
            extras: Default::default(),
        };

        let buffer_view_ind = json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: USize64(ind_len as u64),
            byte_offset: Some(USize64(ind_offset as u64)),
            byte_stride: None,
            name: None,
            target: Some(Checked::Valid(json::buffer::Target::ElementArrayBuffer)),
            extensions: Default::default(),
            extras: Default::default(),
        };

        let accessor_pos = json::Accessor {
            buffer_view: Some(json::Index::new(0)),
            byte_offset: Some(USize64(0)),
            count: USize64(self.positions.len() as u64),
            component_type: Checked::Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::F32,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Checked::Valid(json::accessor::Type::Vec3),
            min: Some(json::Value::from(Vec::from(min))),
            max: Some(json::Value::from(Vec::from(max))),
            name: None,
            normalized: false,
            sparse: None,
        };

        let accessor_col = json::Accessor {
            buffer_view: Some(json::Index::new(1)),
            byte_offset: Some(USize64(0)),
            count: USize64(self.colors.len() as u64),
            component_type: Checked::Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::F32,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Checked::Valid(json::accessor::Type::Vec3),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
        };

        let accessor_ind = json::Accessor {
            buffer_view: Some(json::Index::new(2)),
            byte_offset: Some(USize64(0)),
            count: USize64(self.indices.len() as u64),
            component_type: Checked::Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::U32,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Checked::Valid(json::accessor::Type::Scalar),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
        };

        let material = json::Material {
            double_sided: true,
            name: Some("VertexColored".to_string()),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
                metallic_factor: json::material::StrengthFactor(0.0),
                roughness_factor: json::material::StrengthFactor(0.8),
                ..Default::default()
            },
            ..Default::default()
        };

        let primitive = json::mesh::Primitive {
            attributes: {
                let mut map = BTreeMap::new();
                map.insert(
                    Checked::Valid(json::mesh::Semantic::Positions),
                    json::Index::new(0),
                );
                map.insert(
                    Checked::Valid(json::mesh::Semantic::Colors(0)),
                    json::Index::new(1),
                );
                map
            },
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(json::Index::new(2)),
            material: Some(json::Index::new(0)),
            mode: Checked::Valid(json::mesh::Mode::Triangles),
            targets: None,
        };

        let mesh = json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            primitives: vec![primitive],
            weights: None,
        };

        let node = json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(0)),
            name: None,
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        };

        let root = json::Root {
            accessors: vec![accessor_pos, accessor_col, accessor_ind],
            animations: vec![],
            asset: json::Asset {
                generator: Some("voroprism example".to_string()),
                version: "2.0".to_string(),
                ..Default::default()
            },
            buffers: vec![buffer],
            buffer_views: vec![buffer_view_pos, buffer_view_col, buffer_view_ind],
            cameras: vec![],
            extensions: Default::default(),
            extensions_used: vec![],
            extensions_required: vec![],
            extras: Default::default(),
            images: vec![],
            materials: vec![material],
            meshes: vec![mesh],
            nodes: vec![node],
            samplers: vec![],
            scene: Some(json::Index::new(0)),
            scenes: vec![json::Scene {
                extensions: Default::default(),
                extras: Default::default(),
                name: None,
                nodes: vec![json::Index::new(0)],
            }],
            skins: vec![],
            textures: vec![],
        };

        let json_string = json::serialize::to_string(&root)?;
        let mut json_bytes = json_string.into_bytes();

        // Pad JSON to 4 bytes with spaces
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(0x20);
        }

        let total_length = 12 + 8 + json_bytes.len() as u32 + 8 + buffer_data.len() as u32;

        let mut file = File::create(filename)?;

        // Header
        file.write_all(b"glTF")?;
        file.write_all(&2u32.to_le_bytes())?;
        file.write_all(&total_length.to_le_bytes())?;

        // JSON Chunk
        file.write_all(&(json_bytes.len() as u32).to_le_bytes())?;
        file.write_all(b"JSON")?;
        file.write_all(&json_bytes)?;

        // BIN Chunk
        file.write_all(&(buffer_data.len() as u32).to_le_bytes())?;
        file.write_all(b"BIN\0")?;
        file.write_all(&buffer_data)?;

        Ok(())
    }
}

pub fn save_prisms(
    prisms: &[PrismCell],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = GltfBuilder::new();
    for prism in prisms {
        builder.add_prism(prism);
    }
    builder.save(filename)?;
    println!("Output saved to {}", filename);
    Ok(())
}
