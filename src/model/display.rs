use super::space::{Data, Entity, Space, Transform};
use std::fmt;

/// Renders an assembled Space as an indented tree, for debugging processor output.
pub struct DisplaySpace<'a> {
    pub space: &'a Space,
}

impl<'a> fmt::Display for DisplaySpace<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let space = self.space;
        write!(f, "Space: {} ({})", space.name, space.id)?;
        if space.shows_points() {
            write!(f, " [points]")?;
        }
        if space.lead_collection.is_enabled() {
            write!(f, " [leads]")?;
        }
        writeln!(f)?;

        let total = space.entities.len() + space.datas.len() + space.cameras.len() + space.lights.len();
        let mut index = 0;
        let mut is_last = || {
            index += 1;
            index == total
        };

        for entity in &space.entities {
            self.fmt_entity(f, entity, "", is_last())?;
        }
        for data in &space.datas {
            self.fmt_data(f, data, "", is_last())?;
        }
        for camera in &space.cameras {
            let marker = Self::marker(is_last());
            writeln!(f, "{}Camera: {} {}", marker, camera.id, Self::fmt_transform(&camera.transform))?;
        }
        for light in &space.lights {
            let marker = Self::marker(is_last());
            writeln!(f, "{}Light: {} ({})", marker, light.id, light.light_type)?;
        }
        Ok(())
    }
}

impl<'a> DisplaySpace<'a> {
    fn marker(is_last: bool) -> &'static str {
        if is_last { "└── " } else { "├── " }
    }

    fn child_prefix(prefix: &str, is_last: bool) -> String {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    }

    fn fmt_transform(t: &Transform) -> String {
        format!(
            "@({}, {}, {})",
            t.position.x, t.position.y, t.position.z
        )
    }

    fn fmt_entity(
        &self,
        f: &mut fmt::Formatter<'_>,
        entity: &Entity,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        writeln!(
            f,
            "{}{}Entity: {} <{}> {}",
            prefix,
            Self::marker(is_last),
            entity.id,
            entity.entity_type,
            Self::fmt_transform(&entity.transform)
        )?;
        let child_prefix = Self::child_prefix(prefix, is_last);
        let total = entity.components.len() + entity.events.len();
        for (i, component) in entity.components.iter().enumerate() {
            writeln!(
                f,
                "{}{}Component: {}",
                child_prefix,
                Self::marker(i + 1 == total),
                component.component_type
            )?;
        }
        for (i, event) in entity.events.iter().enumerate() {
            let last_event = entity.components.len() + i + 1 == total;
            writeln!(
                f,
                "{}{}Event: {}",
                child_prefix,
                Self::marker(last_event),
                event.event_type
            )?;
            let action_prefix = Self::child_prefix(&child_prefix, last_event);
            for (j, action) in event.actions.iter().enumerate() {
                write!(
                    f,
                    "{}{}Action: {}",
                    action_prefix,
                    Self::marker(j + 1 == event.actions.len()),
                    action.action_type
                )?;
                match &action.target {
                    Some(target) => writeln!(f, " -> {}", target)?,
                    None => writeln!(f)?,
                }
            }
        }
        Ok(())
    }

    fn fmt_data(
        &self,
        f: &mut fmt::Formatter<'_>,
        data: &Data,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}Data: {} \"{}\"",
            prefix,
            Self::marker(is_last),
            data.data_type,
            data.content
        )?;
        if let Some(points) = &data.points_value {
            write!(f, " ({} pts)", points)?;
        }
        if data.is_correct == Some(true) {
            write!(f, " ✓")?;
        }
        writeln!(f)?;

        let child_prefix = Self::child_prefix(prefix, is_last);
        for (i, answer) in data.answers.iter().enumerate() {
            self.fmt_data(f, answer, &child_prefix, i + 1 == data.answers.len())?;
        }
        Ok(())
    }
}
