// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgendamentoRepository, EmpresaRepository},
    models::agendamento::AgendamentoStatus,
};

#[derive(Clone)]
pub struct DocumentService {
    pool: PgPool,
    repo: AgendamentoRepository,
    empresa_repo: EmpresaRepository,
    fonts_dir: String,
    font_family: String,
}

impl DocumentService {
    pub fn new(
        pool: PgPool,
        repo: AgendamentoRepository,
        empresa_repo: EmpresaRepository,
        fonts_dir: String,
        font_family: String,
    ) -> Self {
        Self {
            pool,
            repo,
            empresa_repo,
            fonts_dir,
            font_family,
        }
    }

    /// Comprovante do agendamento em PDF.
    pub async fn generate_comprovante(&self, agendamento_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados (mesma transação para ler um retrato consistente)
        let mut tx = self.pool.begin().await?;
        let detalhe = self
            .repo
            .find_detalhe(&mut *tx, agendamento_id)
            .await?
            .ok_or(AppError::NotFound("agendamento"))?;
        let empresa = self.empresa_repo.get_empresa(&mut *tx).await?;
        tx.commit().await?;

        let agendamento = &detalhe.agendamento;

        // 2. Configura o PDF
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, &self.font_family, None)
            .map_err(|_| {
                AppError::FontNotFound(format!(
                    "Fonte '{}' não encontrada em {}",
                    self.font_family, self.fonts_dir
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Comprovante {}", codigo_curto(agendamento.id)));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        let title_text = empresa.nome.clone().unwrap_or_else(|| "LAVA-JATO".to_string());
        doc.push(elements::Paragraph::new(title_text)
            .styled(style::Style::new().bold().with_font_size(18)));

        if let Some(cnpj) = &empresa.cnpj {
            doc.push(elements::Paragraph::new(format!("CNPJ: {}", cnpj))
                .styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(1.5));

        doc.push(elements::Paragraph::new(format!(
            "COMPROVANTE DE SERVIÇO #{}",
            codigo_curto(agendamento.id)
        ))
        .styled(style::Style::new().bold().with_font_size(14)));

        doc.push(elements::Break::new(1));

        // --- DADOS DO ATENDIMENTO ---
        let mut linhas = vec![
            ("Data", agendamento.data_hora.format("%d/%m/%Y %H:%M").to_string()),
            ("Cliente", detalhe.cliente_nome.clone()),
        ];
        if let Some(telefone) = &detalhe.cliente_telefone {
            linhas.push(("Telefone", telefone.clone()));
        }
        linhas.push((
            "Veículo",
            format!("{} ({})", detalhe.veiculo_descricao, detalhe.veiculo_placa),
        ));
        linhas.push(("Serviço", detalhe.servico_nome.clone()));
        if let Some(funcionario) = &detalhe.funcionario_nome {
            linhas.push(("Atendente", funcionario.clone()));
        }
        linhas.push(("Situação", status_label(agendamento.status).to_string()));
        if let Some(obs) = &agendamento.observacoes {
            linhas.push(("Observações", obs.clone()));
        }

        let mut table = elements::TableLayout::new(vec![1, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
        let style_bold = style::Style::new().bold();
        for (rotulo, valor) in linhas {
            table
                .row()
                .element(elements::Paragraph::new(rotulo).styled(style_bold))
                .element(elements::Paragraph::new(valor))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAL ---
        let mut total_paragraph = elements::Paragraph::new(format!(
            "TOTAL: {}",
            format_moeda(agendamento.valor_total)
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        doc.push(elements::Break::new(2));

        // --- PAGAMENTO (QR CODE) ---
        // Só faz sentido cobrar o que ainda não foi cancelado
        if let Some(key) = empresa
            .chave_pix
            .as_ref()
            .filter(|_| agendamento.status != AgendamentoStatus::Cancelado)
        {
            doc.push(elements::Paragraph::new("PAGAMENTO VIA PIX")
                .styled(style::Style::new().bold().with_font_size(12)));
            doc.push(elements::Paragraph::new(format!("Chave: {}", key)));
            doc.push(elements::Break::new(1));

            // QR Code simples com o texto da chave (não é um BR Code completo)
            let code = QrCode::new(key.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_scale(genpdf::Scale::new(0.5, 0.5));

            doc.push(pdf_image);
        }

        // --- RODAPÉ ---
        let rodape: Vec<&str> = [&empresa.endereco, &empresa.cidade, &empresa.estado]
            .into_iter()
            .filter_map(|campo| campo.as_deref())
            .collect();
        if !rodape.is_empty() {
            doc.push(elements::Break::new(2));
            doc.push(elements::Paragraph::new(rodape.join(" - "))
                .styled(style::Style::new().italic().with_font_size(8)));
        }

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        tracing::debug!("Comprovante do agendamento {} gerado ({} bytes)", agendamento_id, buffer.len());
        Ok(buffer)
    }
}

// Primeiros 8 caracteres do UUID, em maiúsculas
fn codigo_curto(id: Uuid) -> String {
    id.simple().to_string()[..8].to_uppercase()
}

fn status_label(status: AgendamentoStatus) -> &'static str {
    match status {
        AgendamentoStatus::Agendado => "Agendado",
        AgendamentoStatus::EmAndamento => "Em andamento",
        AgendamentoStatus::Concluido => "Concluído",
        AgendamentoStatus::Cancelado => "Cancelado",
    }
}

/// Valor no formato brasileiro: "R$ 1.234,56".
pub fn format_moeda(valor: Decimal) -> String {
    let texto = format!("{:.2}", valor.round_dp(2).abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    let mut agrupado = String::new();
    for (i, c) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }

    let sinal = if valor.is_sign_negative() && !valor.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sinal, agrupado, centavos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(valor: &str) -> Decimal {
        valor.parse().unwrap()
    }

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_moeda(dec("1234.5")), "R$ 1.234,50");
        assert_eq!(format_moeda(dec("49.9")), "R$ 49,90");
        assert_eq!(format_moeda(dec("1000000")), "R$ 1.000.000,00");
        assert_eq!(format_moeda(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_moeda(dec("-35.456")), "-R$ 35,46");
    }

    #[test]
    fn short_code_is_the_uuid_prefix() {
        let id = Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap();
        assert_eq!(codigo_curto(id), "A1B2C3D4");
    }
}
